//! Agent actions: the audit trail of tool invocations within one turn.
//!
//! [`extract_actions`] turns the messages produced by a single node invocation into
//! [`AgentAction`]s, pairing each tool call with the tool-result message that answers it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::message::Message;

/// One tool invocation and, once observed, its result.
///
/// `tool_output == None` means the call was never answered in the message window
/// it was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub tool_call_id: String,
    pub tool: String,
    #[serde(default)]
    pub tool_input: Map<String, Value>,
    #[serde(default)]
    pub tool_output: Option<String>,
}

impl AgentAction {
    pub fn is_resolved(&self) -> bool {
        self.tool_output.is_some()
    }
}

/// Reconciles tool calls and tool results into an ordered list of actions.
///
/// Each non-tool-result message emits one action per tool call, in call order.
/// Each tool-result message fills `tool_output` on the first emitted action with the
/// same `(tool_call_id, tool)` pair. A result with no matching call is dropped and
/// logged; it never raises.
///
/// Pass only the slice of messages produced by one node invocation, not the full
/// history, so already recorded actions are not extracted twice.
pub fn extract_actions(messages: &[Message]) -> Vec<AgentAction> {
    let mut actions: Vec<AgentAction> = Vec::new();
    for message in messages {
        match message {
            Message::Tool {
                tool_call_id,
                name,
                content,
                ..
            } => {
                let matched = actions
                    .iter_mut()
                    .find(|a| &a.tool_call_id == tool_call_id && &a.tool == name);
                match matched {
                    Some(action) => action.tool_output = Some(content.clone()),
                    None => tracing::warn!(
                        tool_call_id = %tool_call_id,
                        tool = %name,
                        "dropping tool result with no matching tool call"
                    ),
                }
            }
            other => {
                actions.extend(other.tool_calls().iter().map(|call| AgentAction {
                    tool_call_id: call.id.clone(),
                    tool: call.name.clone(),
                    tool_input: call.args.clone(),
                    tool_output: None,
                }));
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;
    use serde_json::json;

    fn args(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    /// **Scenario**: call id "1" to calc followed by its result "42" yields one resolved action.
    #[test]
    fn call_followed_by_result_is_resolved() {
        let messages = vec![
            Message::ai_with_tool_calls(
                "",
                vec![ToolCall::new("1", "calc", args(json!({"expr": "6*7"})))],
            ),
            Message::tool("1", "calc", "42"),
        ];
        let actions = extract_actions(&messages);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].tool_call_id, "1");
        assert_eq!(actions[0].tool, "calc");
        assert_eq!(actions[0].tool_input.get("expr"), Some(&json!("6*7")));
        assert_eq!(actions[0].tool_output.as_deref(), Some("42"));
    }

    #[test]
    fn call_without_result_stays_pending() {
        let messages = vec![Message::ai_with_tool_calls(
            "",
            vec![ToolCall::new("1", "search", Map::new())],
        )];
        let actions = extract_actions(&messages);
        assert_eq!(actions.len(), 1);
        assert!(!actions[0].is_resolved());
    }

    /// **Scenario**: a result whose id matches but name differs is dropped.
    #[test]
    fn result_requires_matching_id_and_name() {
        let messages = vec![
            Message::ai_with_tool_calls("", vec![ToolCall::new("1", "calc", Map::new())]),
            Message::tool("1", "search", "nope"),
        ];
        let actions = extract_actions(&messages);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].tool_output, None);
    }

    #[test]
    fn orphan_result_is_dropped_silently() {
        let messages = vec![Message::human("hi"), Message::tool("9", "calc", "42")];
        assert!(extract_actions(&messages).is_empty());
    }

    /// **Scenario**: a result that precedes its call does not resolve it.
    #[test]
    fn result_before_call_does_not_resolve() {
        let messages = vec![
            Message::tool("1", "calc", "42"),
            Message::ai_with_tool_calls("", vec![ToolCall::new("1", "calc", Map::new())]),
        ];
        let actions = extract_actions(&messages);
        assert_eq!(actions.len(), 1);
        assert!(!actions[0].is_resolved());
    }

    /// **Scenario**: actions keep call order across messages; results arrive out of order.
    #[test]
    fn preserves_call_order_with_interleaved_results() {
        let messages = vec![
            Message::ai_with_tool_calls(
                "",
                vec![
                    ToolCall::new("a", "search", Map::new()),
                    ToolCall::new("b", "calc", Map::new()),
                ],
            ),
            Message::tool("b", "calc", "2"),
            Message::tool("a", "search", "doc"),
            Message::ai_with_tool_calls("", vec![ToolCall::new("c", "calc", Map::new())]),
            Message::tool("c", "calc", "3"),
            Message::ai("done"),
        ];
        let actions = extract_actions(&messages);
        let ids: Vec<_> = actions.iter().map(|a| a.tool_call_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        let outputs: Vec<_> = actions.iter().map(|a| a.tool_output.as_deref()).collect();
        assert_eq!(outputs, [Some("doc"), Some("2"), Some("3")]);
    }

    /// **Scenario**: duplicate call ids resolve the first pending action only.
    #[test]
    fn duplicate_ids_resolve_first_match() {
        let messages = vec![
            Message::ai_with_tool_calls(
                "",
                vec![
                    ToolCall::new("1", "calc", Map::new()),
                    ToolCall::new("1", "calc", Map::new()),
                ],
            ),
            Message::tool("1", "calc", "first"),
        ];
        let actions = extract_actions(&messages);
        assert_eq!(actions[0].tool_output.as_deref(), Some("first"));
        assert_eq!(actions[1].tool_output, None);
    }

    /// **Scenario**: extracting again over the same window gives identical outputs.
    #[test]
    fn re_extraction_is_stable() {
        let messages = vec![
            Message::ai_with_tool_calls("", vec![ToolCall::new("1", "calc", Map::new())]),
            Message::tool("1", "calc", "42"),
        ];
        assert_eq!(extract_actions(&messages), extract_actions(&messages));
    }
}
