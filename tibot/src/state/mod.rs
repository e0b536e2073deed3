//! State types for the orchestration graph.
//!
//! # Main types
//!
//! - [`AgentState`]: the record every node reads; one instance per conversation turn.
//! - [`AgentStateDelta`]: what a node returns; folded in by [`merge`].
//! - [`AgentAction`]: one tool call plus its result, built by [`extract_actions`].
//! - [`Category`], [`Source`]: categorizer and internal-search outputs.
//!
//! # Example
//!
//! ```rust
//! use tibot::{AgentState, Message};
//!
//! let state = AgentState::from_history(vec![Message::ai("Hi, how can I help?")], "Reset my VPN");
//! assert_eq!(state.messages.len(), 2);
//! ```

mod action;
mod agent_state;
mod category;

pub use action::{extract_actions, AgentAction};
pub use agent_state::{add_messages, merge, AgentState, AgentStateDelta, Source};
pub use category::Category;
