//! State graph: typed nodes, a transition table with one optional branch, compile
//! and invoke.
//!
//! Build a [`StateGraph`], compile it to a [`CompiledStateGraph`], then `invoke` it
//! with an initial state or `stream` its per-node updates.

mod compile_error;
mod compiled;
mod conditional;
mod event;
mod key;
mod logging;
mod logging_middleware;
mod node;
mod node_middleware;
mod state_graph;
mod updater;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, EndPredicate};
pub use event::GraphEvent;
pub use key::{NodeKey, Target};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use node::Node;
pub use node_middleware::{NodeFuture, NodeMiddleware};
pub use state_graph::{StateGraph, DEFAULT_RECURSION_LIMIT};
pub use updater::{BoxedStateUpdater, GraphState, ReducerUpdater, StateUpdater};
