//! State graph: nodes, an entry point, unconditional edges and at most one
//! conditional edge.
//!
//! Register nodes with `add_node`, pick the first node with `set_entry_point`, chain
//! them with `add_edge(from, Target)` and optionally add one branch point with
//! `add_conditional_edge(source, should_end, continue_to)`. `compile` validates the
//! transition table and returns a `CompiledStateGraph`.
//!
//! # State Updates
//!
//! Node updates are merged with the state's own reducer ([`GraphState::merge`]).
//! Use `with_state_updater` to substitute a different [`StateUpdater`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, EndPredicate, Transition};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::graph::updater::{BoxedStateUpdater, ReducerUpdater};
use crate::graph::{GraphState, NodeKey, StateUpdater, Target};

/// Default cap on node executions per `invoke`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// State graph builder.
///
/// Generic over the node key `K` and state `S`. Accepts `Arc<dyn Node<K, S>>`;
/// produces `CompiledStateGraph<K, S>`.
pub struct StateGraph<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    nodes: HashMap<K, Arc<dyn Node<K, S>>>,
    entry: Option<K>,
    /// Edges (from, to) in insertion order.
    edges: Vec<(K, Target<K>)>,
    /// Conditional edges in insertion order; compile rejects more than one.
    conditional_edges: Vec<(K, ConditionalRouter<K, S>)>,
    middleware: Option<Arc<dyn NodeMiddleware<K, S>>>,
    state_updater: Option<BoxedStateUpdater<S>>,
    recursion_limit: usize,
}

impl<K, S> Default for StateGraph<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> StateGraph<K, S>
where
    K: NodeKey,
    S: GraphState,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            entry: None,
            edges: Vec::new(),
            conditional_edges: Vec::new(),
            middleware: None,
            state_updater: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches node middleware; every node call in the compiled graph goes through it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<K, S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Replaces the default reducer-based merge.
    pub fn with_state_updater(self, updater: Arc<dyn StateUpdater<S>>) -> Self {
        Self {
            state_updater: Some(updater),
            ..self
        }
    }

    /// Maximum node executions per run before `AgentError::RecursionLimit`.
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Adds a node under its own `id()`. Replaces if same id.
    pub fn add_node(&mut self, node: Arc<dyn Node<K, S>>) -> &mut Self {
        self.nodes.insert(node.id(), node);
        self
    }

    pub fn set_entry_point(&mut self, key: K) -> &mut Self {
        self.entry = Some(key);
        self
    }

    /// Adds an unconditional edge. A node may have one outgoing edge or one
    /// conditional edge, not both.
    pub fn add_edge(&mut self, from: K, to: impl Into<Target<K>>) -> &mut Self {
        self.edges.push((from, to.into()));
        self
    }

    /// Adds the conditional edge from `source`: after `source` runs, the run ends
    /// when `should_end(state)` holds, otherwise continues at `continue_to`.
    pub fn add_conditional_edge(
        &mut self,
        source: K,
        should_end: EndPredicate<S>,
        continue_to: K,
    ) -> &mut Self {
        self.conditional_edges
            .push((source, ConditionalRouter::new(should_end, continue_to)));
        self
    }

    /// Validates the transition table and builds the executable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<K, S>, CompilationError> {
        let entry = self.entry.ok_or(CompilationError::MissingEntryPoint)?;
        let known = |k: &K| self.nodes.contains_key(k);
        let missing = |k: &K| CompilationError::NodeNotFound(k.to_string());

        if !known(&entry) {
            return Err(missing(&entry));
        }
        for (from, to) in &self.edges {
            if !known(from) {
                return Err(missing(from));
            }
            if let Target::Node(to) = to {
                if !known(to) {
                    return Err(missing(to));
                }
            }
        }
        if let Some((source, _)) = self.conditional_edges.get(1) {
            return Err(CompilationError::MultipleConditionalEdges(
                source.to_string(),
            ));
        }
        for (source, router) in &self.conditional_edges {
            if !known(source) {
                return Err(missing(source));
            }
            if !known(&router.continue_to) {
                return Err(missing(&router.continue_to));
            }
        }

        let mut transitions: HashMap<K, Transition<K, S>> = HashMap::new();
        let mut seen = HashSet::new();
        for (from, to) in &self.edges {
            if !seen.insert(*from) {
                return Err(CompilationError::DuplicateEdge(from.to_string()));
            }
            transitions.insert(*from, Transition::Edge(*to));
        }
        for (source, router) in self.conditional_edges {
            if transitions.contains_key(&source) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.to_string(),
                ));
            }
            transitions.insert(source, Transition::Conditional(router));
        }

        // Deterministic error for the same graph regardless of HashMap order.
        let mut dangling: Vec<String> = self
            .nodes
            .keys()
            .filter(|k| !transitions.contains_key(k))
            .map(|k| k.to_string())
            .collect();
        dangling.sort();
        if let Some(node) = dangling.into_iter().next() {
            return Err(CompilationError::DanglingNode(node));
        }
        if !reaches_end(entry, &transitions) {
            return Err(CompilationError::MissingEnd);
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry,
            transitions,
            middleware: self.middleware,
            state_updater: self
                .state_updater
                .unwrap_or_else(|| Arc::new(ReducerUpdater)),
            recursion_limit: self.recursion_limit,
        })
    }
}

/// Follows transitions from `entry`; every node has exactly one, so the walk is a chain
/// that either reaches END, hits the conditional edge (which can end) or cycles.
fn reaches_end<K, S>(entry: K, transitions: &HashMap<K, Transition<K, S>>) -> bool
where
    K: NodeKey,
    S: GraphState,
{
    let mut visited = HashSet::new();
    let mut current = entry;
    while visited.insert(current) {
        match transitions.get(&current) {
            Some(Transition::Edge(Target::End)) | Some(Transition::Conditional(_)) => return true,
            Some(Transition::Edge(Target::Node(next))) => current = *next,
            None => return false,
        }
    }
    false
}
