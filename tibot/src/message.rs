//! Conversation message types.
//!
//! Roles: System, Human, Ai (optionally carrying tool calls) and Tool (the result of
//! one tool call). Every message may carry an `id`; the messages reducer in
//! [`state`](crate::state) assigns one when absent and uses it to replace in place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One tool invocation requested by an AI message.
///
/// `id` correlates the call with the `Tool` message that carries its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// System prompt; placed first when a node invokes its capability.
    System {
        #[serde(default)]
        id: Option<String>,
        content: String,
    },
    /// User input.
    Human {
        #[serde(default)]
        id: Option<String>,
        content: String,
    },
    /// Model reply; `tool_calls` is empty for a final answer.
    Ai {
        #[serde(default)]
        id: Option<String>,
        content: String,
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one tool call.
    Tool {
        #[serde(default)]
        id: Option<String>,
        tool_call_id: String,
        name: String,
        content: String,
    },
}

/// Message role without payload; handy for assertions and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    Human,
    Ai,
    Tool,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            id: None,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            id: None,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai {
            id: None,
            content: content.into(),
            tool_calls: vec![],
        }
    }

    pub fn ai_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Ai {
            id: None,
            content: content.into(),
            tool_calls,
        }
    }

    pub fn tool(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool {
            id: None,
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Sets the message id (builder).
    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        self.set_id(new_id.into());
        self
    }

    pub(crate) fn set_id(&mut self, new_id: String) {
        match self {
            Self::System { id, .. }
            | Self::Human { id, .. }
            | Self::Ai { id, .. }
            | Self::Tool { id, .. } => *id = Some(new_id),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::System { id, .. }
            | Self::Human { id, .. }
            | Self::Ai { id, .. }
            | Self::Tool { id, .. } => id.as_deref(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System { content, .. }
            | Self::Human { content, .. }
            | Self::Ai { content, .. }
            | Self::Tool { content, .. } => content,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::System { .. } => Role::System,
            Self::Human { .. } => Role::Human,
            Self::Ai { .. } => Role::Ai,
            Self::Tool { .. } => Role::Tool,
        }
    }

    /// Tool calls requested by this message; empty for every non-AI message.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Ai { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, Self::Tool { .. })
    }
}
