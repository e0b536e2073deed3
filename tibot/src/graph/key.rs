//! Typed node identifiers and edge targets.
//!
//! Graphs are keyed by a small `Copy` type (usually an enum) instead of strings, so a
//! misspelled node is a type error rather than a runtime lookup failure.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier of a node within one graph.
///
/// Blanket-implemented for every type with the listed bounds; `&'static str` works
/// for quick tests, enums for real workflows.
pub trait NodeKey: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> NodeKey for T where T: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// Where control goes after a node: another node, or the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target<K> {
    Node(K),
    End,
}

impl<K: NodeKey> Display for Target<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(k) => write!(f, "{}", k),
            Self::End => f.write_str("__end__"),
        }
    }
}

impl<K> From<K> for Target<K>
where
    K: NodeKey,
{
    fn from(k: K) -> Self {
        Self::Node(k)
    }
}
