//! Capability bindings per agent role and workflow build errors.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::capability::{ChatCapability, TimeoutCapability};
use crate::config::OrchestrationConfig;
use crate::graph::CompilationError;
use crate::tools::Tool;

use super::AgentKey;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no capability bound for agent {0}")]
    MissingBinding(AgentKey),
    #[error(transparent)]
    Compile(#[from] CompilationError),
}

/// The capability and tools one agent node runs with.
#[derive(Clone)]
pub struct AgentBinding {
    pub capability: Arc<dyn ChatCapability>,
    pub tools: Vec<Arc<dyn Tool>>,
}

impl AgentBinding {
    pub fn new(capability: Arc<dyn ChatCapability>) -> Self {
        Self {
            capability,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    /// The capability, wrapped in a `TimeoutCapability` when the config sets a timeout.
    pub(crate) fn capability_with(&self, config: &OrchestrationConfig) -> Arc<dyn ChatCapability> {
        match config.capability_timeout {
            Some(timeout) => Arc::new(TimeoutCapability::new(self.capability.clone(), timeout)),
            None => self.capability.clone(),
        }
    }
}

/// Bindings keyed by agent role.
#[derive(Clone, Default)]
pub struct AgentBindings {
    bindings: HashMap<AgentKey, AgentBinding>,
}

impl AgentBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `role` (builder). Replaces an earlier binding for the same role.
    pub fn bind(mut self, role: AgentKey, binding: AgentBinding) -> Self {
        self.bindings.insert(role, binding);
        self
    }

    /// Binds every role in `roles` to the same capability and tools.
    pub fn bind_all(mut self, roles: &[AgentKey], binding: AgentBinding) -> Self {
        for role in roles {
            self.bindings.insert(*role, binding.clone());
        }
        self
    }

    pub fn get(&self, role: AgentKey) -> Result<&AgentBinding, BuildError> {
        self.bindings
            .get(&role)
            .ok_or(BuildError::MissingBinding(role))
    }
}
