//! Tool-calling loop over a single-turn [`ChatModel`].
//!
//! call model → run every requested tool through the request's registry → append the
//! results → call the model again, until it answers without tool calls. A schema-bound
//! request then gets one structured completion over the finished conversation.
//!
//! # Error Handling
//!
//! By default tool errors propagate and fail the capability call. Use
//! `with_handle_tool_errors` to change that:
//!
//! - `HandleToolErrors::Never` - errors propagate as `AgentError::Tool` (default)
//! - `HandleToolErrors::Always` - errors are returned to the model as tool-result text

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::message::{Message, ToolCall};
use crate::tools::{ToolError, ToolRegistry};

use super::{CapabilityRequest, CapabilityResponse, ChatCapability, ChatModel};

/// Default cap on model turns per capability call.
pub const DEFAULT_MAX_STEPS: usize = 10;

/// Default tool-result text for a failed tool when errors are handled.
pub const DEFAULT_TOOL_ERROR_TEMPLATE: &str = "Error: {error}\n Please fix your mistakes.";

/// How the loop treats a failing tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HandleToolErrors {
    #[default]
    Never,
    /// Report the error to the model; `Some(text)` replaces the default message.
    Always(Option<String>),
}

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// [`ChatCapability`] that runs a [`ChatModel`] through the tool-calling loop.
#[derive(Clone)]
pub struct ToolLoopCapability {
    model: Arc<dyn ChatModel>,
    max_steps: usize,
    handle_tool_errors: HandleToolErrors,
}

impl ToolLoopCapability {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            max_steps: DEFAULT_MAX_STEPS,
            handle_tool_errors: HandleToolErrors::Never,
        }
    }

    /// Maximum model turns before the call fails with `CapabilityFailed`.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_handle_tool_errors(mut self, handle_tool_errors: HandleToolErrors) -> Self {
        self.handle_tool_errors = handle_tool_errors;
        self
    }

    /// Runs one tool call; `Ok` carries the tool-result text.
    async fn run_tool(&self, tools: &ToolRegistry, call: &ToolCall) -> Result<String, ToolError> {
        let args = Value::Object(call.args.clone());
        match tools.call(&call.name, args).await {
            Ok(content) => {
                debug!(
                    tool = %call.name,
                    call_id = %call.id,
                    output = %truncate_for_log(&content.text, 200),
                    "tool call complete"
                );
                Ok(content.text)
            }
            Err(e) => match &self.handle_tool_errors {
                HandleToolErrors::Never => Err(e),
                HandleToolErrors::Always(custom) => {
                    warn!(tool = %call.name, call_id = %call.id, error = %e, "tool failed, reporting to model");
                    let text = custom
                        .clone()
                        .unwrap_or_else(|| DEFAULT_TOOL_ERROR_TEMPLATE.replace("{error}", &e.to_string()));
                    Ok(text)
                }
            },
        }
    }
}

#[async_trait]
impl ChatCapability for ToolLoopCapability {
    async fn invoke(&self, request: CapabilityRequest) -> Result<CapabilityResponse, AgentError> {
        let specs = request.tools.list();
        let mut input = request.model_input();
        let mut messages = request.messages;

        for step in 0..self.max_steps {
            let reply = self.model.complete(&input, &specs).await?;
            debug!(step, tool_calls = reply.tool_calls.len(), "model turn");
            let calls = reply.tool_calls.clone();
            let ai = Message::ai_with_tool_calls(reply.content, reply.tool_calls);
            input.push(ai.clone());
            messages.push(ai);

            if calls.is_empty() {
                let structured_response = match &request.response_schema {
                    Some(schema) => Some(self.model.complete_structured(&input, schema).await?),
                    None => None,
                };
                return Ok(CapabilityResponse {
                    messages,
                    structured_response,
                });
            }

            for call in &calls {
                let text = self.run_tool(&request.tools, call).await?;
                let result = Message::tool(call.id.clone(), call.name.clone(), text);
                input.push(result.clone());
                messages.push(result);
            }
        }

        Err(AgentError::CapabilityFailed(format!(
            "model still calling tools after {} steps",
            self.max_steps
        )))
    }
}
