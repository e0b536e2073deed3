//! Orchestration error types.
//!
//! Returned by graph nodes, capabilities and `CompiledStateGraph::invoke`. Nodes
//! never swallow these: a failing capability fails the whole turn.

use std::time::Duration;

use thiserror::Error;

use crate::tools::ToolError;

/// Error raised while running a node or a whole workflow.
///
/// Callers treat any `Err` as "turn failed"; an unhelpful but successful answer
/// is reported through `AgentState::able_to_answer` instead.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Generic execution failure (e.g. graph misuse at runtime).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The bound chat capability (model or its tool loop) failed.
    #[error("capability failed: {0}")]
    CapabilityFailed(String),

    /// The capability did not complete within the configured wall-clock bound.
    #[error("capability timed out after {0:?}")]
    CapabilityTimeout(Duration),

    /// A schema-bound node got a missing or malformed structured response.
    #[error("structured response invalid: {0}")]
    StructuredResponse(String),

    /// A tool raised and the capability was configured to propagate tool errors.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    /// The graph took more steps than its recursion limit allows.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),
}
