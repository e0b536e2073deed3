//! Conditional edge: after the source node runs, a predicate over the merged state
//! decides between ending the run and continuing to a fixed node.
//!
//! **Interaction**: Registered by `StateGraph::add_conditional_edge`; resolved by the
//! `CompiledStateGraph` run loop.

use std::sync::Arc;

use super::{GraphState, NodeKey, Target};

/// Predicate deciding whether the run ends after the source node.
pub type EndPredicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// The single branch point of a graph: `should_end(state) ? END : continue_to`.
#[derive(Clone)]
pub struct ConditionalRouter<K, S> {
    pub(super) should_end: EndPredicate<S>,
    pub(super) continue_to: K,
}

impl<K, S> ConditionalRouter<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    pub fn new(should_end: EndPredicate<S>, continue_to: K) -> Self {
        Self {
            should_end,
            continue_to,
        }
    }

    /// Resolves the next target from the state after the source node's update.
    pub fn resolve_next(&self, state: &S) -> Target<K> {
        if (self.should_end)(state) {
            Target::End
        } else {
            Target::Node(self.continue_to)
        }
    }

    pub fn continue_to(&self) -> K {
        self.continue_to
    }
}

/// How to determine the next node after a given node runs.
#[derive(Clone)]
pub(super) enum Transition<K, S> {
    /// Fixed next node (or END).
    Edge(Target<K>),
    /// Decided from the merged state.
    Conditional(ConditionalRouter<K, S>),
}

impl<K, S> Transition<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    pub(super) fn resolve_next(&self, state: &S) -> Target<K> {
        match self {
            Self::Edge(target) => *target,
            Self::Conditional(router) => router.resolve_next(state),
        }
    }
}
