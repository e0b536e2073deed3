//! Tools an agent can call: the [`Tool`] trait, its spec and a name-keyed registry.
//!
//! Anything with a name, an input schema and an async `call` qualifies; nodes accept
//! collections of `Arc<dyn Tool>` and capabilities dispatch through [`ToolRegistry`].

mod registry;

pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification handed to the model: name, description and JSON Schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Serializes structured output as JSON text.
    pub fn json(value: &Value) -> Self {
        Self {
            text: value.to_string(),
        }
    }
}

/// Errors from looking up or calling a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
}

/// A single callable tool.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use tibot::tools::{Tool, ToolCallContent, ToolError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: Some("Echo the input back".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///         }
///     }
///
///     async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError> {
///         Ok(ToolCallContent::json(&args))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name; tool calls are dispatched on it.
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError>;
}
