//! Single-agent workflow: one node, no judge.

use crate::agent::IterationPolicy;
use crate::config::OrchestrationConfig;
use crate::graph::Target;
use crate::profile::AgentProfile;

use super::{add_agent, new_graph, AgentBinding, AgentKey, BuildError, Workflow};

/// START → `Agent` → END. The node uses the profile's `single_agent` prompt.
pub fn build_single_agent_workflow(
    profile: &AgentProfile,
    binding: &AgentBinding,
    config: &OrchestrationConfig,
) -> Result<Workflow, BuildError> {
    let mut graph = new_graph(config, 1);
    add_agent(&mut graph, profile, config, AgentKey::Agent, binding, None);
    graph
        .set_entry_point(AgentKey::Agent)
        .add_edge(AgentKey::Agent, Target::End);

    Ok(Workflow {
        graph: graph.compile()?,
        policy: IterationPolicy::new(config.max_iterations),
    })
}
