//! Agent profile: the deployment's name, secret, prompts and capability descriptions.
//!
//! Supplied by the caller and injected into node factories when a workflow is built; the
//! compiled workflow never changes it.
//!
//! ```toml
//! name = "helpdesk"
//! secret_key = "..."
//!
//! [prompts]
//! categorizer = "Classify the request."
//! able_to_answer = "Decide whether the answer is sufficient."
//!
//! [[capabilities]]
//! name = "vpn"
//! description = "Reset and troubleshoot VPN access"
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::workflow::AgentKey;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("parse profile toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One system prompt per agent role. Missing prompts are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub categorizer: String,
    pub internal_search: String,
    pub able_to_answer: String,
    pub ti_bot: String,
    pub single_agent: String,
}

impl AgentPrompts {
    pub fn for_role(&self, role: AgentKey) -> &str {
        match role {
            AgentKey::Categorizer => &self.categorizer,
            AgentKey::InternalSearch => &self.internal_search,
            AgentKey::AbleToAnswer => &self.able_to_answer,
            AgentKey::TiBot => &self.ti_bot,
            AgentKey::Agent => &self.single_agent,
        }
    }
}

/// Something the deployment can help with, listed in every prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CapabilityDescription {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub prompts: AgentPrompts,
    #[serde(default)]
    pub capabilities: Vec<CapabilityDescription>,
}

impl fmt::Debug for AgentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentProfile")
            .field("name", &self.name)
            .field("secret_key", &"<redacted>")
            .field("prompts", &self.prompts)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl AgentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_prompt(mut self, role: AgentKey, prompt: impl Into<String>) -> Self {
        let slot = match role {
            AgentKey::Categorizer => &mut self.prompts.categorizer,
            AgentKey::InternalSearch => &mut self.prompts.internal_search,
            AgentKey::AbleToAnswer => &mut self.prompts.able_to_answer,
            AgentKey::TiBot => &mut self.prompts.ti_bot,
            AgentKey::Agent => &mut self.prompts.single_agent,
        };
        *slot = prompt.into();
        self
    }

    pub fn with_capability(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.capabilities.push(CapabilityDescription {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// The role's prompt followed by the capability list, if any.
    pub fn system_prompt_for(&self, role: AgentKey) -> String {
        let mut prompt = self.prompts.for_role(role).to_string();
        if self.capabilities.is_empty() {
            return prompt;
        }
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        prompt.push_str("Capabilities:");
        for capability in &self.capabilities {
            prompt.push_str(&format!("\n- {}: {}", capability.name, capability.description));
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
name = "helpdesk"
secret_key = "s3cr3t"

[prompts]
categorizer = "Classify the request."
ti_bot = "Answer the user."

[[capabilities]]
name = "vpn"
description = "Reset VPN access"
"#;

    #[test]
    fn parses_toml_with_missing_prompts_empty() {
        let profile = AgentProfile::from_toml_str(PROFILE).unwrap();
        assert_eq!(profile.name, "helpdesk");
        assert_eq!(profile.prompts.categorizer, "Classify the request.");
        assert_eq!(profile.prompts.internal_search, "");
        assert_eq!(profile.capabilities.len(), 1);
    }

    #[test]
    fn debug_redacts_secret() {
        let profile = AgentProfile::from_toml_str(PROFILE).unwrap();
        let s = format!("{:?}", profile);
        assert!(!s.contains("s3cr3t"), "{}", s);
        assert!(s.contains("<redacted>"));
    }

    #[test]
    fn system_prompt_lists_capabilities() {
        let profile = AgentProfile::from_toml_str(PROFILE).unwrap();
        assert_eq!(
            profile.system_prompt_for(AgentKey::TiBot),
            "Answer the user.\n\nCapabilities:\n- vpn: Reset VPN access"
        );
        assert_eq!(
            profile.system_prompt_for(AgentKey::InternalSearch),
            "Capabilities:\n- vpn: Reset VPN access"
        );
    }

    #[test]
    fn with_prompt_sets_role_slot() {
        let profile = AgentProfile::new("p").with_prompt(AgentKey::Agent, "solo");
        assert_eq!(profile.system_prompt_for(AgentKey::Agent), "solo");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(
            AgentProfile::from_toml_str("name = "),
            Err(ProfileError::Parse(_))
        ));
    }
}
