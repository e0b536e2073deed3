//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph runs, node execution, state updates and
//! routing decisions. No subscriber is installed by the library.

use std::fmt::{Debug, Display};

use crate::error::AgentError;

pub fn log_node_start(node_id: impl Display) {
    tracing::debug!(node_id = %node_id, "Starting node execution");
}

/// Logs the input state of a node at `trace`; states can be large.
pub fn log_node_state<S: Debug>(node_id: impl Display, state: &S) {
    tracing::trace!(node_id = %node_id, state = ?state, "Node execution: state");
}

pub fn log_node_complete(node_id: impl Display, next: impl Display) {
    tracing::debug!(node_id = %node_id, next = %next, "Node execution complete");
}

pub fn log_state_update(node_id: impl Display) {
    tracing::debug!(node_id = %node_id, "State updated");
}

pub fn log_graph_start(entry: impl Display) {
    tracing::info!(entry = %entry, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

pub fn log_graph_error(error: &AgentError) {
    tracing::error!(?error, "Graph execution error");
}
