//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Runs from the entry point, one node at a time:
//! run node → merge its update → resolve the next target from the transition table.
//! Holds no per-run state, so one compiled graph can serve concurrent invocations.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;

use super::conditional::Transition;
use super::event::GraphEvent;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
use super::node_middleware::NodeMiddleware;
use super::updater::BoxedStateUpdater;
use super::{GraphState, Node, NodeKey, Target};

/// Compiled graph: immutable structure.
///
/// A failing node aborts the run and its error is returned as-is; the partially
/// merged state is dropped, never returned.
#[derive(Clone)]
pub struct CompiledStateGraph<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    pub(super) nodes: HashMap<K, Arc<dyn Node<K, S>>>,
    pub(super) entry: K,
    pub(super) transitions: HashMap<K, Transition<K, S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<K, S>>>,
    pub(super) state_updater: BoxedStateUpdater<S>,
    pub(super) recursion_limit: usize,
}

impl<K, S> CompiledStateGraph<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    pub fn entry_point(&self) -> K {
        self.entry
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    async fn execute_node(&self, node: &dyn Node<K, S>, state: &S) -> Result<S::Update, AgentError> {
        match &self.middleware {
            Some(middleware) => middleware.around_run(node.id(), state, node.run(state)).await,
            None => node.run(state).await,
        }
    }

    /// Shared run loop used by invoke() and stream().
    async fn run_loop(
        &self,
        mut state: S,
        events: Option<&mpsc::Sender<GraphEvent<K, S>>>,
    ) -> Result<S, AgentError> {
        log_graph_start(self.entry);
        let mut current = self.entry;
        let mut steps = 0usize;

        loop {
            if steps >= self.recursion_limit {
                let err = AgentError::RecursionLimit(self.recursion_limit);
                log_graph_error(&err);
                return Err(err);
            }
            steps += 1;

            let node = match self.nodes.get(&current) {
                Some(node) => node.clone(),
                None => {
                    let err = AgentError::ExecutionFailed(format!("node not found: {}", current));
                    log_graph_error(&err);
                    return Err(err);
                }
            };

            log_node_start(current);
            log_node_state(current, &state);
            if let Some(tx) = events {
                if tx.send(GraphEvent::NodeStart { node: current }).await.is_err() {
                    return Err(AgentError::ExecutionFailed(
                        "stream receiver dropped".into(),
                    ));
                }
            }

            let update = match self.execute_node(node.as_ref(), &state).await {
                Ok(update) => update,
                Err(e) => {
                    log_graph_error(&e);
                    return Err(e);
                }
            };

            state = self.state_updater.apply_update(state, update);
            log_state_update(current);

            if let Some(tx) = events {
                let event = GraphEvent::Update {
                    node: current,
                    state: state.clone(),
                };
                if tx.send(event).await.is_err() {
                    return Err(AgentError::ExecutionFailed(
                        "stream receiver dropped".into(),
                    ));
                }
            }

            let next = self
                .transitions
                .get(&current)
                .map(|t| t.resolve_next(&state))
                .unwrap_or(Target::End);
            log_node_complete(current, next);

            match next {
                Target::End => {
                    log_graph_complete(steps);
                    return Ok(state);
                }
                Target::Node(id) => current = id,
            }
        }
    }

    /// Runs the graph to completion and returns the final state.
    ///
    /// Dropping the returned future abandons the in-flight node; nothing is
    /// returned for a run that did not reach END.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        self.run_loop(state, None).await
    }

    /// Streams graph execution: `NodeStart` / `Update` per node, then `Done` or `Error`.
    ///
    /// The run happens on a spawned task; dropping the stream stops it at the next
    /// node boundary.
    pub fn stream(&self, state: S) -> ReceiverStream<GraphEvent<K, S>> {
        let (tx, rx) = mpsc::channel(64);
        let graph = self.clone();

        tokio::spawn(async move {
            let last = match graph.run_loop(state, Some(&tx)).await {
                Ok(state) => GraphEvent::Done(state),
                Err(e) => GraphEvent::Error(e.to_string()),
            };
            let _ = tx.send(last).await;
        });

        ReceiverStream::new(rx)
    }
}
