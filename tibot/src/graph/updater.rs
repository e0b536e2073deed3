//! State merge semantics: how a node's update is folded into the graph state.
//!
//! Per-field update strategies (append for lists, replace for scalars) are declared
//! by the state type itself through [`GraphState::merge`]. The graph calls a
//! [`StateUpdater`] after every node; the default [`ReducerUpdater`] delegates to
//! that merge, and a custom updater can be attached with
//! `StateGraph::with_state_updater` when a graph needs different semantics.

use std::fmt::Debug;
use std::sync::Arc;

/// A state type usable in a `StateGraph`.
///
/// `Update` is the partial state a node returns; `merge` is the side-effect-free reducer that
/// combines the current state with one update.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    type Update: Send + Debug + 'static;

    fn merge(self, update: Self::Update) -> Self;
}

/// Folds one node update into the current state.
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: GraphState,
{
    fn apply_update(&self, current: S, update: S::Update) -> S;
}

/// Default updater: the state's own reducer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReducerUpdater;

impl<S> StateUpdater<S> for ReducerUpdater
where
    S: GraphState,
{
    fn apply_update(&self, current: S, update: S::Update) -> S {
        current.merge(update)
    }
}

/// Shared updater handle stored by the graph.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;
