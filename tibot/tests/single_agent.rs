//! Single-agent workflow: one node, actions accumulate across turns.

mod common;

use std::sync::Arc;

use serde_json::json;
use tibot::capability::{MockCapability, MockChatModel, MockReply};
use tibot::{
    build_single_agent_workflow, AgentBinding, AgentKey, AgentProfile, Message,
    OrchestrationConfig, Role, Tool, ToolCall, ToolLoopCapability,
};

use common::{calc_args, calc_round, Calculator};

/// **Scenario**: two turns with disjoint tool calls keep every action of both turns.
#[tokio::test]
async fn actions_accumulate_across_invocations() {
    let capability = Arc::new(MockCapability::new(vec![
        calc_round("c1", "3", "three"),
        calc_round("c2", "3", "three again"),
    ]));
    let workflow = build_single_agent_workflow(
        &AgentProfile::new("solo").with_prompt(AgentKey::Agent, "Use the calculator."),
        &AgentBinding::new(capability.clone()),
        &OrchestrationConfig::default(),
    )
    .unwrap();

    let first = workflow.run_turn(vec![], "1+2?").await.unwrap();
    assert_eq!(first.agent_actions.len(), 1);

    let history = first.messages.clone();
    let mut second = first;
    second.messages.push(Message::human("again?"));
    let second = workflow.invoke(second).await.unwrap();

    let ids: Vec<_> = second
        .agent_actions
        .iter()
        .map(|a| a.tool_call_id.as_str())
        .collect();
    assert_eq!(ids, ["c1", "c2"]);
    assert!(second.agent_actions.iter().all(|a| a.is_resolved()));
    assert_eq!(second.messages.len(), history.len() + 2);
    assert_eq!(second.last_ai_reply(), Some("three again"));
    assert_eq!(capability.call_count(), 2);
}

#[tokio::test]
async fn single_agent_runs_exactly_once() {
    let capability = Arc::new(MockCapability::answering("Hello there"));
    let workflow = build_single_agent_workflow(
        &AgentProfile::new("solo"),
        &AgentBinding::new(capability.clone()),
        &OrchestrationConfig::default().with_max_iterations(5),
    )
    .unwrap();

    let state = workflow.run_turn(vec![Message::ai("Welcome")], "Hi").await.unwrap();
    assert_eq!(capability.call_count(), 1);
    let roles: Vec<_> = state.messages.iter().map(Message::role).collect();
    assert_eq!(roles, [Role::Ai, Role::Human, Role::Ai]);
    assert!(state.answer_confidence_scores.is_empty());
    assert!(state.messages.iter().all(|m| m.id().is_some()));
}

/// **Scenario**: the tool loop runs the real tool and the node records the action.
#[tokio::test]
async fn tool_loop_capability_records_tool_action() {
    let model = Arc::new(MockChatModel::first_tool_then_answer(
        ToolCall::new("call-1", "calc", calc_args(20, 22)),
        "The answer is 42.",
    ));
    let binding = AgentBinding::new(Arc::new(ToolLoopCapability::new(model)))
        .with_tools(vec![Arc::new(Calculator) as Arc<dyn Tool>]);
    let workflow =
        build_single_agent_workflow(&AgentProfile::new("solo"), &binding, &OrchestrationConfig::default())
            .unwrap();

    let state = workflow.run_turn(vec![], "20 + 22?").await.unwrap();

    assert_eq!(state.agent_actions.len(), 1);
    let action = &state.agent_actions[0];
    assert_eq!(action.tool, "calc");
    assert_eq!(action.tool_input.get("a"), Some(&json!(20)));
    assert_eq!(action.tool_output.as_deref(), Some("42"));
    assert_eq!(state.last_ai_reply(), Some("The answer is 42."));
    assert_eq!(state.messages.len(), 2);
}

#[tokio::test]
async fn node_sends_tool_specs_to_capability() {
    let capability = Arc::new(MockCapability::answering("ok"));
    let binding = AgentBinding::new(capability.clone())
        .with_tools(vec![Arc::new(Calculator) as Arc<dyn Tool>]);
    let workflow =
        build_single_agent_workflow(&AgentProfile::new("solo"), &binding, &OrchestrationConfig::default())
            .unwrap();

    workflow.run_turn(vec![], "hi").await.unwrap();
    let specs = capability.requests()[0].tools.list();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "calc");
    assert!(capability.requests()[0].response_schema.is_none());
}

/// **Scenario**: a capability that adds nothing to the conversation answers with empty text.
#[tokio::test]
async fn capability_without_new_messages_answers_empty() {
    let capability = Arc::new(MockCapability::new(vec![MockReply::messages(vec![])]));
    let workflow = build_single_agent_workflow(
        &AgentProfile::new("solo"),
        &AgentBinding::new(capability),
        &OrchestrationConfig::default(),
    )
    .unwrap();

    let state = workflow.run_turn(vec![], "Hello").await.unwrap();

    let transcript: Vec<_> = state
        .messages
        .iter()
        .map(|m| (m.role(), m.content()))
        .collect();
    assert_eq!(transcript, [(Role::Human, "Hello"), (Role::Ai, "")]);
}
