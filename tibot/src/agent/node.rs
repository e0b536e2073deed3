//! Agent node: one capability call per run, folded into an [`AgentStateDelta`].
//!
//! [`make_node`] binds a capability, a system prompt, tools and an optional
//! [`ResponseSchema`] under a node key. Each run:
//!
//! 1. sends the prompt, the full conversation and the tools to the capability;
//! 2. takes the last message produced by this call as the final answer (`""` when it
//!    produced none);
//! 3. extracts actions from the messages produced by this call only;
//! 4. returns one new AI message, the actions and, when schema-bound, the structured fields.
//!
//! Capability errors propagate unchanged; there is no retry.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::capability::{CapabilityRequest, ChatCapability};
use crate::error::AgentError;
use crate::graph::{NodeKey, Node};
use crate::message::Message;
use crate::state::{extract_actions, AgentAction, AgentState, AgentStateDelta};
use crate::tools::{Tool, ToolRegistry};

use super::ResponseSchema;

/// Graph node driving one bound capability. Build with [`make_node`].
#[derive(Clone)]
pub struct AgentNode<K> {
    key: K,
    capability: Arc<dyn ChatCapability>,
    prompt: String,
    tools: ToolRegistry,
    response_schema: Option<ResponseSchema>,
}

/// Creates an agent node under `key`.
///
/// Tools are registered by name; a later tool replaces an earlier one with the same name.
pub fn make_node<K: NodeKey>(
    key: K,
    capability: Arc<dyn ChatCapability>,
    prompt: impl Into<String>,
    tools: Vec<Arc<dyn Tool>>,
    response_schema: Option<ResponseSchema>,
) -> AgentNode<K> {
    AgentNode {
        key,
        capability,
        prompt: prompt.into(),
        tools: tools.into_iter().collect(),
        response_schema,
    }
}

impl<K: NodeKey> AgentNode<K> {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn response_schema(&self) -> Option<&ResponseSchema> {
        self.response_schema.as_ref()
    }
}

fn warn_unresolved(node: impl Display, actions: &[AgentAction]) {
    for action in actions.iter().filter(|a| !a.is_resolved()) {
        warn!(
            node = %node,
            tool_call_id = %action.tool_call_id,
            tool = %action.tool,
            "tool call left without a result"
        );
    }
}

#[async_trait]
impl<K: NodeKey> Node<K, AgentState> for AgentNode<K> {
    fn id(&self) -> K {
        self.key
    }

    async fn run(&self, state: &AgentState) -> Result<AgentStateDelta, AgentError> {
        let request = CapabilityRequest::new(self.prompt.clone(), state.messages.clone())
            .with_tools(self.tools.clone())
            .with_response_schema(self.response_schema.as_ref().map(|s| s.spec().clone()));

        let response = self.capability.invoke(request).await?;

        let produced = response
            .messages
            .get(state.messages.len()..)
            .unwrap_or_default();
        let final_text = produced
            .last()
            .map(|m| m.content().to_string())
            .unwrap_or_default();
        let actions = extract_actions(produced);
        warn_unresolved(self.key, &actions);
        debug!(
            node = %self.key,
            produced = produced.len(),
            actions = actions.len(),
            "capability answered"
        );

        let mut delta = AgentStateDelta {
            messages: vec![Message::ai(final_text)],
            agent_actions: actions,
            ..AgentStateDelta::default()
        };

        if let Some(schema) = &self.response_schema {
            let value = response.structured_response.ok_or_else(|| {
                AgentError::StructuredResponse(format!(
                    "{}: node {} got no structured response",
                    schema.name(),
                    self.key
                ))
            })?;
            schema.apply(value, &mut delta)?;
        }

        Ok(delta)
    }
}
