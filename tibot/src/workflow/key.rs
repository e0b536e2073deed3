//! Node keys of the built-in workflows.

use std::fmt;

/// Agent roles, one node each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKey {
    /// Classifies the user's request.
    Categorizer,
    /// Searches the knowledge base for sources.
    InternalSearch,
    /// Judges whether the conversation so far answers the user.
    AbleToAnswer,
    /// General assistant; answers when the judge is not yet satisfied.
    TiBot,
    /// The only node of the single-agent workflow.
    Agent,
}

impl AgentKey {
    pub const ALL: [AgentKey; 5] = [
        Self::Categorizer,
        Self::InternalSearch,
        Self::AbleToAnswer,
        Self::TiBot,
        Self::Agent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categorizer => "categorizer",
            Self::InternalSearch => "internal_search",
            Self::AbleToAnswer => "able_to_answer",
            Self::TiBot => "ti_bot",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
