//! Logging middleware that records enter/exit and elapsed time around each node call.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::AgentError;

use super::node_middleware::NodeFuture;
use super::{GraphState, NodeKey, NodeMiddleware};

/// Middleware that logs node enter/exit with elapsed milliseconds.
pub struct LoggingNodeMiddleware<K, S> {
    _phantom: PhantomData<fn() -> (K, S)>,
}

impl<K, S> Default for LoggingNodeMiddleware<K, S> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<K, S> NodeMiddleware<K, S> for LoggingNodeMiddleware<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: K,
        _state: &S,
        inner: NodeFuture<'_, S::Update>,
    ) -> Result<S::Update, AgentError> {
        tracing::info!(node = %node_id, "node enter");
        let started = Instant::now();
        let result = inner.await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(node = %node_id, elapsed_ms, "node exit"),
            Err(e) => tracing::warn!(node = %node_id, elapsed_ms, error = %e, "node failed"),
        }
        result
    }
}
