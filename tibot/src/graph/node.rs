//! Graph node trait: one step in a StateGraph.
//!
//! Receives the current state by reference and returns a partial update; the graph
//! merges it and picks the next node from its transition table.

use async_trait::async_trait;

use crate::error::AgentError;

use super::{GraphState, NodeKey};

/// One step in a graph: state in, update out.
///
/// Implementations must not mutate anything outside the returned update; all I/O
/// happens inside whatever capability the node wraps. Errors propagate to the
/// caller of `CompiledStateGraph::invoke` unchanged.
#[async_trait]
pub trait Node<K, S>: Send + Sync
where
    K: NodeKey,
    S: GraphState,
{
    /// Node id. Must be unique within a graph.
    fn id(&self) -> K;

    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}
