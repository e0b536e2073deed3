//! Able-to-answer judge: verdict payload and the termination predicate.
//!
//! The judge node is an agent node bound to [`AbleToAnswer`]; each run appends one
//! confidence score and overwrites the verdict. [`should_end`] decides, after every
//! judge run, whether the turn is over or loops back.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::graph::EndPredicate;
use crate::state::{AgentState, AgentStateDelta};

use super::StructuredResponse;

/// Judge verdict. Scores are opaque integers; values above 1 count as confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AbleToAnswer {
    pub able_to_answer: bool,
    pub answer_confidence_score: i64,
}

impl StructuredResponse for AbleToAnswer {
    const NAME: &'static str = "AbleToAnswer";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "able_to_answer": {"type": "boolean"},
                "answer_confidence_score": {"type": "integer"}
            },
            "required": ["able_to_answer", "answer_confidence_score"]
        })
    }

    fn apply(self, delta: &mut AgentStateDelta) {
        delta.able_to_answer = Some(self.able_to_answer);
        delta.answer_confidence_scores.push(self.answer_confidence_score);
    }
}

/// True when the turn should end after a judge run:
/// a confident positive verdict, or the judge has run `max_iterations` times.
///
/// `max_iterations == 0` ends immediately.
pub fn should_end(state: &AgentState, max_iterations: usize) -> bool {
    let scores = &state.answer_confidence_scores;
    let confident = state.able_to_answer && scores.last().is_some_and(|&score| score > 1);
    confident || scores.len() >= max_iterations
}

/// Loop bound for the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationPolicy {
    pub max_iterations: usize,
}

impl Default for IterationPolicy {
    fn default() -> Self {
        Self { max_iterations: 1 }
    }
}

impl IterationPolicy {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn should_end(&self, state: &AgentState) -> bool {
        should_end(state, self.max_iterations)
    }

    /// The predicate for `StateGraph::add_conditional_edge`.
    pub fn end_predicate(self) -> EndPredicate<AgentState> {
        Arc::new(move |state: &AgentState| self.should_end(state))
    }
}
