//! Shared fixtures: a calculator tool and scripted replies.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use tibot::capability::MockReply;
use tibot::{Message, Tool, ToolCall, ToolCallContent, ToolError, ToolSpec};

/// Adds `a` and `b`.
pub struct Calculator;

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "calc"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "calc".to_string(),
            description: Some("Add two integers".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {"a": {"type": "integer"}, "b": {"type": "integer"}},
                "required": ["a", "b"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError> {
        let get = |k: &str| {
            args.get(k)
                .and_then(Value::as_i64)
                .ok_or_else(|| ToolError::InvalidInput(format!("missing integer {}", k)))
        };
        Ok(ToolCallContent::text((get("a")? + get("b")?).to_string()))
    }
}

pub fn calc_args(a: i64, b: i64) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("a".into(), json!(a));
    args.insert("b".into(), json!(b));
    args
}

/// A reply that calls `calc` once under `call_id`, gets `output` back, then answers `answer`.
pub fn calc_round(call_id: &str, output: &str, answer: &str) -> MockReply {
    MockReply::messages(vec![
        Message::ai_with_tool_calls("", vec![ToolCall::new(call_id, "calc", calc_args(1, 2))]),
        Message::tool(call_id, "calc", output),
        Message::ai(answer),
    ])
}

/// A judge reply: `text` plus an AbleToAnswer verdict.
pub fn verdict(text: &str, able_to_answer: bool, score: i64) -> MockReply {
    MockReply::text(text).with_structured(json!({
        "able_to_answer": able_to_answer,
        "answer_confidence_score": score
    }))
}
