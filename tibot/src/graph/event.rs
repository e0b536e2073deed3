//! Events emitted by `CompiledStateGraph::stream`.

/// One step of a streamed run.
///
/// A run yields `NodeStart`/`Update` pairs in execution order and finishes with
/// exactly one `Done` or `Error`.
#[derive(Debug, Clone)]
pub enum GraphEvent<K, S> {
    /// The node is about to run.
    NodeStart { node: K },
    /// The node finished; `state` is the state after merging its update.
    Update { node: K, state: S },
    /// The run reached END.
    Done(S),
    /// The run failed; carries the error's display text.
    Error(String),
}
