//! Drives the root reducer the way the browser would, without a DOM.
//!
//! Run with: cargo test --test conversation_flow

use agent_flow_frontend::constants::*;
use agent_flow_frontend::messages::{Command, Message};
use agent_flow_frontend::models::{FlowGraph, MessageContent, MessageKind, Mode, Sender};
use agent_flow_frontend::network::contract::decode_agent_response;
use agent_flow_frontend::network::{AgentResponse, ApiError};
use agent_flow_frontend::state::AppState;
use agent_flow_frontend::update::update;
use proptest::prelude::*;
use serde_json::json;

/// Submit `text` in `mode` and return the sequence number of the request.
fn submit(state: &mut AppState, mode: Mode, text: &str) -> u64 {
    update(state, Message::SwitchMode(mode));
    update(state, Message::UpdateInputText(text.to_string()));
    let cmds = update(state, Message::SubmitInput);
    assert!(state.input_text.is_empty());
    match cmds.as_slice() {
        [Command::RunAgent { seq, mode: sent, task }] => {
            assert_eq!(*sent, mode);
            assert_eq!(task, text);
            *seq
        }
        other => panic!("expected one RunAgent command, got {:?}", other),
    }
}

fn respond(state: &mut AppState, seq: u64, mode: Mode, body: serde_json::Value) {
    let response: AgentResponse = decode_agent_response(&body.to_string()).unwrap();
    let cmds = update(state, Message::AgentResponseReceived { seq, mode, response });
    assert!(cmds.is_empty());
}

#[test]
fn structured_execution_result_sets_details() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "plan a trip");
    assert!(state.is_loading());

    let payload = json!({
        "title": "Trip",
        "summary": "Three stops",
        "steps": ["book", "pack", "go"],
        "cost": 1200
    });
    let before = state.history.len();
    respond(&mut state, seq, Mode::Execution, json!({ "result": payload, "agent_used": "CrewAI" }));

    assert!(!state.is_loading());
    assert_eq!(state.history.len(), before + 1);
    let last = state.history.last().unwrap();
    assert_eq!(last.kind, MessageKind::Structured);
    assert_eq!(last.content, MessageContent::Structured(payload.clone()));
    assert_eq!(last.agent_name.as_deref(), Some("CrewAI"));

    let details = state.execution_details.as_ref().unwrap();
    assert_eq!(serde_json::to_value(details).unwrap(), payload);
}

#[test]
fn structured_result_with_object_steps_is_kept_whole() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "research it");
    let payload = json!({
        "title": "Report",
        "steps": [{ "agent": "researcher", "output": "done" }]
    });
    respond(&mut state, seq, Mode::Execution, json!({ "result": payload }));

    let last = state.history.last().unwrap();
    assert_eq!(last.kind, MessageKind::Structured);
    let details = state.execution_details.as_ref().unwrap();
    assert_eq!(details.title.as_deref(), Some("Report"));
    assert_eq!(serde_json::to_value(details).unwrap(), payload);
}

#[test]
fn structured_result_with_odd_known_keys_is_not_an_error() {
    for payload in [json!({ "title": 42, "summary": "x" }), json!({ "title": null, "summary": "x" })] {
        let mut state = AppState::new();
        let seq = submit(&mut state, Mode::Execution, "x");
        respond(&mut state, seq, Mode::Execution, json!({ "result": payload }));

        assert_eq!(state.history.last().unwrap().kind, MessageKind::Structured);
        let details = state.execution_details.as_ref().unwrap();
        assert_eq!(details.summary.as_deref(), Some("x"));
        assert_eq!(serde_json::to_value(details).unwrap(), payload);
    }
}

#[test]
fn dialogue_text_result_leaves_details_alone() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Dialogue, "hello");
    let before = state.history.len();
    respond(&mut state, seq, Mode::Dialogue, json!({ "result": "hi there" }));

    assert_eq!(state.history.len(), before + 1);
    let last = state.history.last().unwrap();
    assert_eq!((last.sender, last.kind), (Sender::Bot, MessageKind::Text));
    assert_eq!(last.content.as_text(), Some("hi there"));
    assert!(state.execution_details.is_none());
}

#[test]
fn execution_text_result_wraps_raw_text() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "summarise");
    respond(&mut state, seq, Mode::Execution, json!({ "result": "all done" }));
    let details = state.execution_details.as_ref().unwrap();
    assert_eq!(details.raw.as_deref(), Some("all done"));
}

#[test]
fn unexpected_and_empty_results_become_errors() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "x");
    respond(&mut state, seq, Mode::Execution, json!({ "result": [1, 2, 3] }));
    let last = state.history.last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.content.as_text(), Some(UNEXPECTED_FORMAT_MESSAGE));

    let seq = submit(&mut state, Mode::Dialogue, "y");
    respond(&mut state, seq, Mode::Dialogue, json!({ "result": "" }));
    let last = state.history.last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.content.as_text(), Some(EMPTY_RESPONSE_MESSAGE));
}

#[test]
fn flow_update_replaces_graph_wholesale() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "build a flow");
    let flow = json!({
        "nodes": [
            { "id": "a", "type": "input", "data": { "label": "Start" }, "position": { "x": 0, "y": 0 } },
            { "id": "b", "data": { "label": "Work" }, "position": { "x": 0, "y": 100 } },
            { "id": "c", "type": "output", "data": { "label": "End" }, "position": { "x": 0, "y": 200 } }
        ],
        "edges": [
            { "id": "e1", "source": "a", "target": "b", "animated": true },
            { "id": "e2", "source": "b", "target": "c" }
        ]
    });
    respond(
        &mut state,
        seq,
        Mode::Execution,
        json!({ "result": "ok", "flow_update": flow }),
    );

    let ids: Vec<&str> = state.flow.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert!(!state.flow.contains_node(INITIAL_NODE_ID));
    let pairs: Vec<(&str, &str)> = state
        .flow
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
    assert_eq!(state.history.last().unwrap().content.as_text(), Some(FLOW_UPDATED_MESSAGE));
}

#[test]
fn flow_update_drops_edges_to_unknown_nodes() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "x");
    let flow = json!({
        "nodes": [
            { "id": "a", "data": { "label": "A" }, "position": { "x": 0, "y": 0 } },
            { "id": "b", "data": { "label": "B" }, "position": { "x": 0, "y": 100 } }
        ],
        "edges": [
            { "source": "a", "target": "b" },
            { "source": "b", "target": "ghost" }
        ]
    });
    respond(&mut state, seq, Mode::Execution, json!({ "result": "ok", "flow_update": flow }));

    assert_eq!(state.flow.nodes.len(), 2);
    assert_eq!(state.flow.edges.len(), 1);
    assert_eq!(state.flow.edges[0].target, "b");
    assert_eq!(state.history.last().unwrap().content.as_text(), Some(FLOW_UPDATED_MESSAGE));
}

#[test]
fn flow_update_missing_edges_is_ignored() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "x");
    respond(
        &mut state,
        seq,
        Mode::Execution,
        json!({ "result": "ok", "flow_update": { "nodes": [] } }),
    );
    assert_eq!(state.flow, FlowGraph::initial());
}

#[test]
fn clear_resets_everything_and_leaves_one_notice() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "x");
    respond(&mut state, seq, Mode::Execution, json!({ "result": { "title": "t" } }));
    assert!(state.execution_details.is_some());

    update(&mut state, Message::ClearChat);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].kind, MessageKind::Info);
    assert_eq!(state.flow, FlowGraph::initial());
    assert!(state.execution_details.is_none());
    assert!(!state.is_loading());
}

#[test]
fn failed_request_appends_exactly_one_error() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Dialogue, "hello");
    let before = state.history.len();

    update(
        &mut state,
        Message::AgentRequestFailed {
            seq,
            error: ApiError::from_status(500, r#"{"error": "engine crashed"}"#),
        },
    );
    assert_eq!(state.history.len(), before + 1);
    let last = state.history.last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.content.as_text(), Some("Server error: 500 - engine crashed"));
    assert!(!state.is_loading());
}

#[test]
fn response_after_clear_is_dropped() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Dialogue, "slow question");
    update(&mut state, Message::ClearChat);
    respond(&mut state, seq, Mode::Dialogue, json!({ "result": "late answer" }));
    assert_eq!(state.history.len(), 1);
}

#[test]
fn failure_after_clear_is_dropped() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "slow task");
    update(&mut state, Message::ClearChat);
    let history = state.history.clone();

    update(
        &mut state,
        Message::AgentRequestFailed { seq, error: ApiError::transport("Network Error") },
    );
    assert_eq!(state.history, history);
    assert!(!state.is_loading());
}

#[test]
fn only_the_latest_submission_settles() {
    let mut state = AppState::new();
    let first = submit(&mut state, Mode::Dialogue, "one");
    let second = submit(&mut state, Mode::Dialogue, "two");

    respond(&mut state, first, Mode::Dialogue, json!({ "result": "answer one" }));
    assert!(state.is_loading());
    assert!(state.history.iter().all(|m| m.content.as_text() != Some("answer one")));

    respond(&mut state, second, Mode::Dialogue, json!({ "result": "answer two" }));
    assert!(!state.is_loading());
    assert_eq!(state.history.last().unwrap().content.as_text(), Some("answer two"));
}

#[test]
fn switching_mode_touches_nothing_else() {
    let mut state = AppState::new();
    let seq = submit(&mut state, Mode::Execution, "x");
    respond(&mut state, seq, Mode::Execution, json!({ "result": { "title": "t" } }));
    let history = state.history.clone();
    let details = state.execution_details.clone();

    update(&mut state, Message::SwitchMode(Mode::Dialogue));
    assert_eq!(state.mode, Mode::Dialogue);
    assert_eq!(state.history, history);
    assert_eq!(state.execution_details, details);
}

#[test]
fn start_up_checks_backend_health() {
    let mut state = AppState::new();
    assert_eq!(update(&mut state, Message::AppStarted), vec![Command::CheckHealth]);
}

proptest! {
    #[test]
    fn whitespace_input_is_never_submitted(text in "[ \t\n\r]{0,16}") {
        let mut state = AppState::new();
        update(&mut state, Message::UpdateInputText(text));
        let cmds = update(&mut state, Message::SubmitInput);
        prop_assert!(cmds.is_empty());
        prop_assert!(state.history.is_empty());
        prop_assert!(!state.is_loading());
    }

    #[test]
    fn message_ids_are_unique(texts in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut state = AppState::new();
        for text in &texts {
            let seq = submit(&mut state, Mode::Dialogue, text);
            update(&mut state, Message::AgentRequestFailed { seq, error: ApiError::transport("Failed to fetch") });
        }
        let mut ids: Vec<&str> = state.history.iter().map(|m| m.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        prop_assert_eq!(total, texts.len() * 3);
    }
}
