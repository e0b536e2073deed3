//! Agent nodes and their structured outputs.
//!
//! - [`make_node`] / [`AgentNode`]: a capability bound to a prompt, tools and an
//!   optional [`ResponseSchema`].
//! - [`judge`]: the [`AbleToAnswer`] verdict and the [`should_end`] loop predicate.

pub mod judge;
mod node;
mod structured;

pub use judge::{should_end, AbleToAnswer, IterationPolicy};
pub use node::{make_node, AgentNode};
pub use structured::{CategoryVerdict, ResponseSchema, SearchResult, StructuredResponse};
