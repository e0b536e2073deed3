//! Single-turn chat model seam used by [`ToolLoopCapability`](super::ToolLoopCapability).
//!
//! Provider clients live outside this crate; they implement [`ChatModel`] and the tool
//! loop does the rest.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

use super::OutputSchema;

/// One model turn: assistant text and the tool calls it asks for.
///
/// Empty `tool_calls` means the model produced its final answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ModelReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
        }
    }
}

/// Chat model: given messages (system prompt first) and the available tools, returns
/// one assistant turn.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<ModelReply, AgentError>;

    /// Asks for a JSON value following `schema`, based on the conversation so far.
    async fn complete_structured(
        &self,
        messages: &[Message],
        schema: &OutputSchema,
    ) -> Result<Value, AgentError>;
}

/// Mock model: replays scripted turns, then a fixed structured value.
///
/// Once the script is exhausted the last turn repeats; with no turns at all it answers
/// with empty text. `complete_structured` fails when no structured value is set.
#[derive(Debug, Default)]
pub struct MockChatModel {
    turns: Vec<ModelReply>,
    structured: Option<Value>,
    calls: AtomicUsize,
}

impl MockChatModel {
    pub fn new(turns: Vec<ModelReply>) -> Self {
        Self {
            turns,
            structured: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers with `content` and never calls tools.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(vec![ModelReply::text(content)])
    }

    /// First turn calls `tool_call`, second turn answers with `content`.
    pub fn first_tool_then_answer(tool_call: ToolCall, content: impl Into<String>) -> Self {
        Self::new(vec![
            ModelReply::with_tool_calls("", vec![tool_call]),
            ModelReply::text(content),
        ])
    }

    /// Sets the value returned by `complete_structured` (builder).
    pub fn with_structured(mut self, value: Value) -> Self {
        self.structured = Some(value);
        self
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(
        &self,
        _messages: &[Message],
        _tools: &[ToolSpec],
    ) -> Result<ModelReply, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .turns
            .get(n)
            .or_else(|| self.turns.last())
            .cloned()
            .unwrap_or_default())
    }

    async fn complete_structured(
        &self,
        _messages: &[Message],
        schema: &OutputSchema,
    ) -> Result<Value, AgentError> {
        self.structured.clone().ok_or_else(|| {
            AgentError::CapabilityFailed(format!("no structured output scripted for {}", schema.name))
        })
    }
}
