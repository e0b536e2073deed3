//! Node middleware: wrap every node call with external async logic (around pattern).
//!
//! Set via `StateGraph::with_middleware`.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::AgentError;

use super::{GraphState, NodeKey};

/// The pending node call handed to middleware.
pub type NodeFuture<'a, U> = BoxFuture<'a, Result<U, AgentError>>;

/// Async middleware around node execution.
///
/// Must await `inner` to run the node; may time it, log it, or map its result.
#[async_trait]
pub trait NodeMiddleware<K, S>: Send + Sync
where
    K: NodeKey,
    S: GraphState,
{
    /// - `node_id`: node about to run
    /// - `state`: state passed to the node
    /// - `inner`: the node call itself
    async fn around_run(
        &self,
        node_id: K,
        state: &S,
        inner: NodeFuture<'_, S::Update>,
    ) -> Result<S::Update, AgentError>;
}
