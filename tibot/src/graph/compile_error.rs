//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the entry point is missing, an edge refers
//! to an unregistered node, or the transition table is not a valid chain with at
//! most one conditional branch.

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// A node id used in an edge or as entry point was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// `set_entry_point` was never called.
    #[error("graph has no entry point")]
    MissingEntryPoint,

    /// END cannot be reached from the entry point.
    #[error("graph has no path to END")]
    MissingEnd,

    /// A node has two outgoing unconditional edges (fan-out is not supported).
    #[error("node has more than one outgoing edge: {0}")]
    DuplicateEdge(String),

    /// A node has both an outgoing edge and a conditional edge; it must have exactly one.
    #[error("node has both edge and conditional edge: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// More than one conditional edge was registered.
    #[error("graph supports at most one conditional edge, found another on: {0}")]
    MultipleConditionalEdges(String),

    /// A registered node has no outgoing transition, so the run would stall there.
    #[error("node has no outgoing edge: {0}")]
    DanglingNode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of NodeNotFound contains "node not found" and the node id.
    #[test]
    fn compilation_error_display_node_not_found() {
        let s = CompilationError::NodeNotFound("x".to_string()).to_string();
        assert!(s.contains("node not found"), "{}", s);
        assert!(s.contains("x"), "{}", s);
    }

    #[test]
    fn compilation_error_display_mentions_entry_and_end() {
        let s = CompilationError::MissingEntryPoint.to_string();
        assert!(s.contains("entry point"), "{}", s);
        let s = CompilationError::MissingEnd.to_string();
        assert!(s.contains("END"), "{}", s);
    }
}
