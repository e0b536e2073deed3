//! Structured responses: typed payloads a schema-bound node folds into its delta.
//!
//! A node bound to a [`ResponseSchema`] sends the schema with its capability request
//! and applies the returned JSON to the delta it emits. Built-in payloads:
//! [`CategoryVerdict`], [`SearchResult`] and [`AbleToAnswer`](super::AbleToAnswer).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::capability::OutputSchema;
use crate::error::AgentError;
use crate::state::{AgentStateDelta, Category, Source};

/// A payload type a capability can be asked to produce.
pub trait StructuredResponse: DeserializeOwned + Send + 'static {
    /// Schema name sent to the model.
    const NAME: &'static str;

    /// JSON Schema of the payload.
    fn json_schema() -> Value;

    /// Writes the payload's fields into the node's delta.
    fn apply(self, delta: &mut AgentStateDelta);
}

/// Type-erased [`StructuredResponse`] binding for one node.
#[derive(Clone)]
pub struct ResponseSchema {
    spec: OutputSchema,
    apply: fn(Value, &mut AgentStateDelta) -> Result<(), AgentError>,
}

impl std::fmt::Debug for ResponseSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSchema")
            .field("name", &self.spec.name)
            .finish()
    }
}

fn apply_json<T: StructuredResponse>(value: Value, delta: &mut AgentStateDelta) -> Result<(), AgentError> {
    let payload: T = serde_json::from_value(value)
        .map_err(|e| AgentError::StructuredResponse(format!("{}: {}", T::NAME, e)))?;
    payload.apply(delta);
    Ok(())
}

impl ResponseSchema {
    pub fn of<T: StructuredResponse>() -> Self {
        Self {
            spec: OutputSchema {
                name: T::NAME.to_string(),
                schema: T::json_schema(),
            },
            apply: apply_json::<T>,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &OutputSchema {
        &self.spec
    }

    /// Parses `value` and applies it; a malformed value is `AgentError::StructuredResponse`.
    pub fn apply(&self, value: Value, delta: &mut AgentStateDelta) -> Result<(), AgentError> {
        (self.apply)(value, delta)
    }
}

/// Categorizer output: the category of the user's request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryVerdict {
    pub category: Category,
}

impl StructuredResponse for CategoryVerdict {
    const NAME: &'static str = "CategoryVerdict";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "One of Query, Issue, Approval/Validate, Informational, Others"
                }
            },
            "required": ["category"]
        })
    }

    fn apply(self, delta: &mut AgentStateDelta) {
        delta.category = Some(self.category);
    }
}

/// Internal-search output: knowledge-base documents relevant to the request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl StructuredResponse for SearchResult {
    const NAME: &'static str = "SearchResult";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "sources": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "url": {"type": "string"},
                            "source_index": {"type": "integer", "minimum": 0}
                        },
                        "required": ["title", "url", "source_index"]
                    }
                }
            },
            "required": ["sources"]
        })
    }

    fn apply(self, delta: &mut AgentStateDelta) {
        delta.sources = Some(self.sources);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_verdict_sets_category() {
        let schema = ResponseSchema::of::<CategoryVerdict>();
        let mut delta = AgentStateDelta::default();
        schema
            .apply(json!({"category": "Approval/Validate"}), &mut delta)
            .unwrap();
        assert_eq!(delta.category, Some(Category::ApprovalValidate));
        assert_eq!(schema.name(), "CategoryVerdict");
    }

    #[test]
    fn search_result_replaces_sources() {
        let schema = ResponseSchema::of::<SearchResult>();
        let mut delta = AgentStateDelta::default();
        schema
            .apply(
                json!({"sources": [{"title": "VPN guide", "url": "https://kb/vpn", "source_index": 1}]}),
                &mut delta,
            )
            .unwrap();
        let sources = delta.sources.unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "VPN guide");
    }

    /// **Scenario**: a payload of the wrong shape is a StructuredResponse error naming the schema.
    #[test]
    fn malformed_payload_is_structured_response_error() {
        let schema = ResponseSchema::of::<SearchResult>();
        let mut delta = AgentStateDelta::default();
        let err = schema
            .apply(json!({"sources": "none"}), &mut delta)
            .unwrap_err();
        assert!(matches!(err, AgentError::StructuredResponse(ref m) if m.starts_with("SearchResult")));
        assert_eq!(delta, AgentStateDelta::default());
    }
}
