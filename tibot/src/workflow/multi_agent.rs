//! Judge-driven workflows.

use crate::agent::{AbleToAnswer, CategoryVerdict, IterationPolicy, ResponseSchema, SearchResult};
use crate::config::OrchestrationConfig;
use crate::profile::AgentProfile;

use super::{add_agent, new_graph, AgentBinding, AgentBindings, AgentKey, BuildError, Workflow};

/// Judge runs in a turn that never gets a confident verdict.
fn judge_passes(config: &OrchestrationConfig) -> usize {
    config.max_iterations.max(1)
}

/// START → `AbleToAnswer`; after each run END if the judge is done, else run it again.
pub fn build_able_to_answer_workflow(
    profile: &AgentProfile,
    binding: &AgentBinding,
    config: &OrchestrationConfig,
) -> Result<Workflow, BuildError> {
    let policy = IterationPolicy::new(config.max_iterations);
    let mut graph = new_graph(config, judge_passes(config));
    add_agent(
        &mut graph,
        profile,
        config,
        AgentKey::AbleToAnswer,
        binding,
        Some(ResponseSchema::of::<AbleToAnswer>()),
    );
    graph
        .set_entry_point(AgentKey::AbleToAnswer)
        .add_conditional_edge(
            AgentKey::AbleToAnswer,
            policy.end_predicate(),
            AgentKey::AbleToAnswer,
        );

    Ok(Workflow {
        graph: graph.compile()?,
        policy,
    })
}

/// START → `Categorizer` → `InternalSearch` → `AbleToAnswer`; from the judge, END when
/// done, else `TiBot` → back to `AbleToAnswer`.
///
/// Needs a binding for each of those four roles.
pub fn build_multi_agent_workflow(
    profile: &AgentProfile,
    bindings: &AgentBindings,
    config: &OrchestrationConfig,
) -> Result<Workflow, BuildError> {
    let policy = IterationPolicy::new(config.max_iterations);
    // Categorizer and InternalSearch once, then the judge and TiBot per extra pass.
    let mut graph = new_graph(config, 2 * judge_passes(config) + 1);

    let nodes = [
        (
            AgentKey::Categorizer,
            Some(ResponseSchema::of::<CategoryVerdict>()),
        ),
        (
            AgentKey::InternalSearch,
            Some(ResponseSchema::of::<SearchResult>()),
        ),
        (
            AgentKey::AbleToAnswer,
            Some(ResponseSchema::of::<AbleToAnswer>()),
        ),
        (AgentKey::TiBot, None),
    ];
    for (key, schema) in nodes {
        add_agent(&mut graph, profile, config, key, bindings.get(key)?, schema);
    }

    graph
        .set_entry_point(AgentKey::Categorizer)
        .add_edge(AgentKey::Categorizer, AgentKey::InternalSearch)
        .add_edge(AgentKey::InternalSearch, AgentKey::AbleToAnswer)
        .add_conditional_edge(AgentKey::AbleToAnswer, policy.end_predicate(), AgentKey::TiBot)
        .add_edge(AgentKey::TiBot, AgentKey::AbleToAnswer);

    Ok(Workflow {
        graph: graph.compile()?,
        policy,
    })
}
