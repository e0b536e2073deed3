//! # tibot
//!
//! Multi-agent chat orchestration over a typed state graph. One [`AgentState`] flows
//! through the nodes of a workflow for each conversation turn; every node calls its bound
//! chat capability and returns an [`AgentStateDelta`] that the graph merges in.
//!
//! ## Design principles
//!
//! - **Pure merges**: nodes never mutate state; [`merge`] folds each delta in with one
//!   reducer per field (append messages by id, append scores and actions, replace the rest).
//!   The only non-deterministic step is assigning uuids to messages that arrive without an id.
//! - **Typed graphs**: nodes are keyed by [`AgentKey`]; edges target [`Target::Node`] or
//!   [`Target::End`]; at most one conditional edge per graph.
//! - **Opaque capabilities**: the model and its tool loop sit behind [`ChatCapability`];
//!   their errors propagate to the caller unchanged.
//!
//! ## Main modules
//!
//! - [`state`]: [`AgentState`], [`AgentStateDelta`], [`AgentAction`], [`extract_actions`].
//! - [`message`]: [`Message`], [`ToolCall`].
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`NodeMiddleware`].
//! - [`agent`]: [`make_node`], [`ResponseSchema`], the judge ([`AbleToAnswer`], [`should_end`]).
//! - [`capability`]: [`ChatCapability`], [`ToolLoopCapability`], [`TimeoutCapability`], mocks.
//! - [`tools`]: [`Tool`], [`ToolRegistry`].
//! - [`workflow`]: single-agent, able-to-answer and multi-agent workflows.
//! - [`profile`], [`config`]: caller-supplied prompts and environment settings.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use tibot::capability::{MockCapability, MockReply};
//! use tibot::{
//!     build_able_to_answer_workflow, AgentBinding, AgentProfile, OrchestrationConfig,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let capability = MockCapability::new(vec![MockReply::text("Hi")
//!     .with_structured(json!({"able_to_answer": true, "answer_confidence_score": 2}))]);
//! let workflow = build_able_to_answer_workflow(
//!     &AgentProfile::new("helpdesk"),
//!     &AgentBinding::new(Arc::new(capability)),
//!     &OrchestrationConfig::default(),
//! )?;
//!
//! let state = workflow.run_turn(vec![], "Hello").await?;
//! assert_eq!(state.last_ai_reply(), Some("Hi"));
//! assert_eq!(state.answer_confidence_scores, vec![2]);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod capability;
pub mod config;
pub mod error;
pub mod graph;
pub mod message;
pub mod profile;
pub mod state;
pub mod tools;
pub mod workflow;

pub use agent::{
    make_node, should_end, AbleToAnswer, AgentNode, CategoryVerdict, IterationPolicy,
    ResponseSchema, SearchResult, StructuredResponse,
};
pub use capability::{
    CapabilityRequest, CapabilityResponse, ChatCapability, ChatModel, HandleToolErrors,
    TimeoutCapability, ToolLoopCapability,
};
pub use config::{ConfigError, OrchestrationConfig};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, GraphEvent, GraphState, Node, NodeKey, NodeMiddleware,
    StateGraph, Target,
};
pub use message::{Message, Role, ToolCall};
pub use profile::{AgentProfile, ProfileError};
pub use state::{extract_actions, merge, AgentAction, AgentState, AgentStateDelta, Category, Source};
pub use tools::{Tool, ToolCallContent, ToolError, ToolRegistry, ToolSpec};
pub use workflow::{
    build_able_to_answer_workflow, build_multi_agent_workflow, build_single_agent_workflow,
    AgentBinding, AgentBindings, AgentKey, BuildError, Workflow,
};
