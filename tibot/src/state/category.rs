//! Query category labels written by the categorizer agent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification of a user query.
///
/// One of the closed set, or any other free-form label the model produced.
/// Serialized as its display string so it round-trips through JSON and TOML.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Query,
    Issue,
    ApprovalValidate,
    Informational,
    Others,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Query => "Query",
            Self::Issue => "Issue",
            Self::ApprovalValidate => "Approval/Validate",
            Self::Informational => "Informational",
            Self::Others => "Others",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Ok(match normalized.as_str() {
            "query" => Self::Query,
            "issue" => Self::Issue,
            "approvalvalidate" | "approval" | "validate" => Self::ApprovalValidate,
            "informational" => Self::Informational,
            "others" | "other" => Self::Others,
            _ => Self::Custom(s.trim().to_string()),
        })
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(c) => c,
            Err(never) => match never {},
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}
