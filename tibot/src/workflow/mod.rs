//! Built-in workflows over [`AgentState`].
//!
//! - [`build_single_agent_workflow`]: START → `Agent` → END.
//! - [`build_able_to_answer_workflow`]: START → `AbleToAnswer`, looping back to itself
//!   until the judge says the turn is over.
//! - [`build_multi_agent_workflow`]: START → `Categorizer` → `InternalSearch` →
//!   `AbleToAnswer`; then END when the judge is satisfied, else `TiBot` → `AbleToAnswer`.
//!
//! Every node gets its prompt from the [`AgentProfile`] and its capability and tools from
//! an [`AgentBinding`]. All workflows log node timings through `LoggingNodeMiddleware`.
//!
//! The recursion limit is raised where needed so a judge that is never confident still
//! ends the turn through `max_iterations` rather than `AgentError::RecursionLimit`.

mod binding;
mod key;
mod multi_agent;
mod single_agent;

pub use binding::{AgentBinding, AgentBindings, BuildError};
pub use key::AgentKey;
pub use multi_agent::{build_able_to_answer_workflow, build_multi_agent_workflow};
pub use single_agent::build_single_agent_workflow;

use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;

use crate::agent::{make_node, IterationPolicy, ResponseSchema};
use crate::config::OrchestrationConfig;
use crate::error::AgentError;
use crate::graph::{CompiledStateGraph, GraphEvent, LoggingNodeMiddleware, StateGraph};
use crate::message::Message;
use crate::profile::AgentProfile;
use crate::state::AgentState;

/// A compiled workflow plus the iteration policy its judge edge uses.
///
/// Cheap to clone; one instance can serve concurrent turns.
#[derive(Clone)]
pub struct Workflow {
    graph: CompiledStateGraph<AgentKey, AgentState>,
    policy: IterationPolicy,
}

impl Workflow {
    pub fn graph(&self) -> &CompiledStateGraph<AgentKey, AgentState> {
        &self.graph
    }

    pub fn policy(&self) -> IterationPolicy {
        self.policy
    }

    /// Runs one turn from a prepared state to END.
    pub async fn invoke(&self, state: AgentState) -> Result<AgentState, AgentError> {
        self.graph.invoke(state).await
    }

    /// Like `invoke`, reporting each node as it runs.
    pub fn stream(&self, state: AgentState) -> ReceiverStream<GraphEvent<AgentKey, AgentState>> {
        self.graph.stream(state)
    }

    /// Runs one turn for `user_message` on top of `history`.
    pub async fn run_turn(
        &self,
        history: Vec<Message>,
        user_message: impl Into<String>,
    ) -> Result<AgentState, AgentError> {
        self.invoke(AgentState::from_history(history, user_message)).await
    }
}

/// New graph whose recursion limit also fits `steps_needed`, the node runs a turn takes
/// when the judge uses its whole iteration budget.
fn new_graph(
    config: &OrchestrationConfig,
    steps_needed: usize,
) -> StateGraph<AgentKey, AgentState> {
    StateGraph::<AgentKey, AgentState>::new()
        .with_recursion_limit(config.recursion_limit.max(steps_needed))
        .with_middleware(Arc::new(LoggingNodeMiddleware::default()))
}

/// Adds the node for `key` bound as `binding` with the profile's prompt for that role.
fn add_agent(
    graph: &mut StateGraph<AgentKey, AgentState>,
    profile: &AgentProfile,
    config: &OrchestrationConfig,
    key: AgentKey,
    binding: &AgentBinding,
    schema: Option<ResponseSchema>,
) {
    let node = make_node(
        key,
        binding.capability_with(config),
        profile.system_prompt_for(key),
        binding.tools.clone(),
        schema,
    );
    graph.add_node(Arc::new(node));
}
