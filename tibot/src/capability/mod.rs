//! Chat capabilities: the opaque "model plus tools" an agent node is bound to.
//!
//! A node builds a [`CapabilityRequest`] from its prompt, the conversation so far and its
//! tools, and gets back the full message list (input plus everything produced while
//! answering) and, for schema-bound nodes, a structured response.
//!
//! Implementations:
//! - [`ToolLoopCapability`]: drives a single-turn [`ChatModel`] through the tool-calling loop.
//! - [`TimeoutCapability`]: wraps any capability with a wall-clock bound.
//! - [`MockCapability`] / [`MockChatModel`]: scripted doubles for tests.

mod mock;
mod model;
mod timeout;
mod tool_loop;

pub use mock::{MockCapability, MockReply};
pub use model::{ChatModel, MockChatModel, ModelReply};
pub use timeout::TimeoutCapability;
pub use tool_loop::{
    HandleToolErrors, ToolLoopCapability, DEFAULT_MAX_STEPS, DEFAULT_TOOL_ERROR_TEMPLATE,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::Message;
use crate::tools::ToolRegistry;

/// JSON schema a structured response must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub schema: Value,
}

/// One capability call.
///
/// `messages` is the conversation without the system prompt; the prompt is
/// prepended by [`model_input`](Self::model_input).
#[derive(Debug, Clone)]
pub struct CapabilityRequest {
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub tools: ToolRegistry,
    pub response_schema: Option<OutputSchema>,
}

impl CapabilityRequest {
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
            tools: ToolRegistry::new(),
            response_schema: None,
        }
    }

    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_response_schema(mut self, schema: Option<OutputSchema>) -> Self {
        self.response_schema = schema;
        self
    }

    /// Messages as the model sees them: the system prompt (when non-empty) first.
    pub fn model_input(&self) -> Vec<Message> {
        let mut input = Vec::with_capacity(self.messages.len() + 1);
        if !self.system_prompt.is_empty() {
            input.push(Message::system(self.system_prompt.clone()));
        }
        input.extend(self.messages.iter().cloned());
        input
    }
}

/// Result of one capability call.
///
/// `messages` starts with the request's `messages` (not the system prompt) followed by
/// every message produced while answering, tool calls and tool results included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityResponse {
    pub messages: Vec<Message>,
    pub structured_response: Option<Value>,
}

/// A model-backed capability bound to an agent node.
///
/// Failures are returned as-is; nodes never catch them.
#[async_trait]
pub trait ChatCapability: Send + Sync {
    async fn invoke(&self, request: CapabilityRequest) -> Result<CapabilityResponse, AgentError>;
}
