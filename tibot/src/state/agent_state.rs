//! Shared state for the orchestration graph and the delta nodes return.
//!
//! Nodes never mutate [`AgentState`] directly: they return an [`AgentStateDelta`] and
//! the graph folds it in with [`merge`], which applies one reducer per field.

use serde::{Deserialize, Serialize};

use crate::graph::GraphState;
use crate::message::{Message, Role};

use super::{AgentAction, Category};

/// A knowledge-base document cited in an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub source_index: u32,
}

/// State flowing through every node of a workflow for one conversation turn.
///
/// Field reducers:
/// - `messages`: [`add_messages`] (replace by id, otherwise append)
/// - `category`, `sources`, `able_to_answer`: replaced when the delta carries a value
/// - `answer_confidence_scores`, `agent_actions`: appended
/// - `expected_category`: caller-owned, never touched by nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub expected_category: Option<Category>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub able_to_answer: bool,
    #[serde(default)]
    pub answer_confidence_scores: Vec<i64>,
    #[serde(default)]
    pub agent_actions: Vec<AgentAction>,
}

impl AgentState {
    /// Initial state for a turn: prior chat history followed by the new user message.
    pub fn from_history(history: Vec<Message>, user_message: impl Into<String>) -> Self {
        let mut messages = history;
        messages.push(Message::human(user_message));
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_expected_category(mut self, category: Category) -> Self {
        self.expected_category = Some(category);
        self
    }

    /// Content of the chronologically last AI message, if any.
    pub fn last_ai_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::Ai)
            .map(Message::content)
    }

    /// Actions whose tool call never got a result.
    pub fn pending_actions(&self) -> impl Iterator<Item = &AgentAction> {
        self.agent_actions.iter().filter(|a| !a.is_resolved())
    }
}

/// Partial state returned by one node invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentStateDelta {
    pub messages: Vec<Message>,
    pub category: Option<Category>,
    pub sources: Option<Vec<Source>>,
    pub able_to_answer: Option<bool>,
    pub answer_confidence_scores: Vec<i64>,
    pub agent_actions: Vec<AgentAction>,
}

/// Folds a node's delta into the state without side effects.
///
/// Deterministic except for message ids: messages that arrive without one get a fresh
/// uuid (see [`add_messages`]), so two merges of the same id-less input differ only there.
pub fn merge(state: AgentState, delta: AgentStateDelta) -> AgentState {
    let AgentState {
        messages,
        category,
        expected_category,
        sources,
        able_to_answer,
        mut answer_confidence_scores,
        mut agent_actions,
    } = state;

    answer_confidence_scores.extend(delta.answer_confidence_scores);
    agent_actions.extend(delta.agent_actions);

    AgentState {
        messages: add_messages(messages, delta.messages),
        category: delta.category.or(category),
        expected_category,
        sources: delta.sources.unwrap_or(sources),
        able_to_answer: delta.able_to_answer.unwrap_or(able_to_answer),
        answer_confidence_scores,
        agent_actions,
    }
}

/// Messages reducer: gives every incoming message an id, replaces an existing
/// message with the same id in place and appends the rest in order.
pub fn add_messages(mut current: Vec<Message>, incoming: Vec<Message>) -> Vec<Message> {
    for m in current.iter_mut().filter(|m| m.id().is_none()) {
        m.set_id(uuid::Uuid::new_v4().to_string());
    }
    for mut message in incoming {
        let id = match message.id() {
            Some(id) => id.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                message.set_id(id.clone());
                id
            }
        };
        match current.iter().position(|m| m.id() == Some(id.as_str())) {
            Some(pos) => current[pos] = message,
            None => current.push(message),
        }
    }
    current
}

impl GraphState for AgentState {
    type Update = AgentStateDelta;

    fn merge(self, update: AgentStateDelta) -> Self {
        merge(self, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn action(id: &str) -> AgentAction {
        AgentAction {
            tool_call_id: id.into(),
            tool: "calc".into(),
            tool_input: Map::new(),
            tool_output: Some("1".into()),
        }
    }

    #[test]
    fn from_history_appends_user_message_last() {
        let s = AgentState::from_history(vec![Message::ai("earlier")], "Hello");
        assert_eq!(s.messages.len(), 2);
        assert_eq!(s.messages[1].role(), Role::Human);
        assert_eq!(s.messages[1].content(), "Hello");
    }

    /// **Scenario**: additive fields append, replace fields overwrite, absent fields keep old values.
    #[test]
    fn merge_applies_field_reducers() {
        let state = AgentState {
            messages: vec![Message::human("q")],
            category: Some(Category::Query),
            expected_category: Some(Category::Issue),
            sources: vec![Source {
                title: "old".into(),
                url: "u0".into(),
                source_index: 0,
            }],
            able_to_answer: true,
            answer_confidence_scores: vec![1],
            agent_actions: vec![action("a")],
        };
        let delta = AgentStateDelta {
            messages: vec![Message::ai("r")],
            able_to_answer: Some(false),
            answer_confidence_scores: vec![3],
            agent_actions: vec![action("b")],
            ..Default::default()
        };
        let out = merge(state, delta);
        assert_eq!(out.messages.len(), 2);
        assert_eq!(out.category, Some(Category::Query));
        assert_eq!(out.expected_category, Some(Category::Issue));
        assert_eq!(out.sources[0].title, "old");
        assert!(!out.able_to_answer);
        assert_eq!(out.answer_confidence_scores, vec![1, 3]);
        assert_eq!(out.agent_actions.len(), 2);
    }

    #[test]
    fn merge_replaces_sources_wholesale() {
        let state = AgentState {
            sources: vec![
                Source {
                    title: "a".into(),
                    url: "ua".into(),
                    source_index: 0,
                },
                Source {
                    title: "b".into(),
                    url: "ub".into(),
                    source_index: 1,
                },
            ],
            ..Default::default()
        };
        let delta = AgentStateDelta {
            sources: Some(vec![Source {
                title: "c".into(),
                url: "uc".into(),
                source_index: 0,
            }]),
            ..Default::default()
        };
        let out = merge(state, delta);
        assert_eq!(out.sources.len(), 1);
        assert_eq!(out.sources[0].title, "c");
    }

    #[test]
    fn merge_is_deterministic_when_messages_carry_ids() {
        let state = AgentState {
            messages: vec![Message::human("q").with_id("1")],
            ..AgentState::default()
        };
        let delta = AgentStateDelta {
            messages: vec![Message::ai("a").with_id("2")],
            answer_confidence_scores: vec![1],
            ..AgentStateDelta::default()
        };
        assert_eq!(
            merge(state.clone(), delta.clone()),
            merge(state.clone(), delta.clone())
        );

        let unlabelled = AgentStateDelta {
            messages: vec![Message::ai("a")],
            ..AgentStateDelta::default()
        };
        let first = merge(state.clone(), unlabelled.clone());
        let second = merge(state, unlabelled);
        assert_ne!(first.messages[1].id(), second.messages[1].id());
        assert_eq!(first.messages[1].content(), second.messages[1].content());
    }

    #[test]
    fn add_messages_assigns_ids_and_appends() {
        let out = add_messages(vec![Message::human("a")], vec![Message::ai("b")]);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| m.id().is_some()));
        assert_ne!(out[0].id(), out[1].id());
    }

    /// **Scenario**: an incoming message with an existing id replaces it in place.
    #[test]
    fn add_messages_replaces_by_id() {
        let current = vec![
            Message::human("a").with_id("1"),
            Message::ai("draft").with_id("2"),
        ];
        let out = add_messages(
            current,
            vec![Message::ai("final").with_id("2"), Message::human("next")],
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].content(), "final");
        assert_eq!(out[2].content(), "next");
    }

    #[test]
    fn last_ai_reply_and_pending_actions() {
        let mut s = AgentState::from_history(vec![], "hi");
        assert_eq!(s.last_ai_reply(), None);
        s.messages.push(Message::ai("hello"));
        assert_eq!(s.last_ai_reply(), Some("hello"));
        let mut pending = action("p");
        pending.tool_output = None;
        s.agent_actions = vec![action("done"), pending];
        let ids: Vec<_> = s.pending_actions().map(|a| a.tool_call_id.as_str()).collect();
        assert_eq!(ids, ["p"]);
    }
}
