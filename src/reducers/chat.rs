//! Conversation reducer: submission, request settlement, clearing and the
//! start-up health notice.

use crate::constants::*;
use crate::messages::{Command, Message};
use crate::models::{ExecutionDetails, FlowGraph, MessageContent, MessageKind, Mode, Sender};
use crate::network::{AgentResponse, AgentResult};
use crate::state::AppState;

/// Returns `true` when the message was handled by the chat reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::AppStarted => {
            cmds.push(Command::CheckHealth);
            true
        }
        Message::BackendHealthChecked(outcome) => {
            match outcome {
                Ok(health) => {
                    if !health.engines_available {
                        state.push_info(ENGINES_UNAVAILABLE_MESSAGE);
                    }
                    state.backend_health = Some(Ok(health.clone()));
                }
                Err(e) => {
                    log::warn!("Backend health check failed: {}", e);
                    state.push_info(format!("Backend health check failed: {}", e.user_message()));
                    state.backend_health = Some(Err(e.user_message()));
                }
            }
            true
        }
        Message::SwitchMode(mode) => {
            state.mode = *mode;
            true
        }
        Message::UpdateInputText(text) => {
            state.input_text = text.clone();
            true
        }
        Message::SubmitInput => {
            let text = state.input_text.clone();
            submit(state, text, cmds);
            true
        }
        Message::ClearChat => {
            state.history.clear();
            state.invalidate_requests();
            state.execution_details = None;
            state.replace_flow(FlowGraph::initial());
            state.push_info(CHAT_CLEARED_MESSAGE);
            true
        }
        Message::AgentResponseReceived {
            seq,
            mode,
            response,
        } => {
            if !state.settle_request(*seq) {
                debug_log!(
                    "Dropping stale response seq={} (latest={})",
                    seq,
                    state.latest_seq()
                );
                return true;
            }
            apply_response(state, *mode, response);
            true
        }
        Message::AgentRequestFailed { seq, error } => {
            if !state.settle_request(*seq) {
                debug_log!("Dropping stale failure seq={}: {}", seq, error);
                return true;
            }
            log::warn!("Agent request {} failed: {}", seq, error);
            state.push_error(error.user_message());
            true
        }
        _ => false,
    }
}

fn submit(state: &mut AppState, text: String, cmds: &mut Vec<Command>) {
    if text.trim().is_empty() {
        return;
    }
    let mode = state.mode;

    state.push_text(Sender::User, text.clone(), MessageKind::Text);
    state.input_text.clear();
    let seq = state.begin_request();
    state.execution_details = None;
    state.push_info(mode.sending_notice());

    debug_log!("Submitting seq={} to {}", seq, mode.endpoint());
    cmds.push(Command::RunAgent {
        seq,
        mode,
        task: text,
    });
}

/// `mode` is the mode the request was sent in, not the current one.
fn apply_response(state: &mut AppState, mode: Mode, response: &AgentResponse) {
    let agent_name = response.agent_used.clone();

    match (&response.result, mode) {
        (AgentResult::Structured { value, details }, Mode::Execution) => {
            state.push_message(
                Sender::Bot,
                MessageContent::Structured(value.clone()),
                MessageKind::Structured,
                agent_name,
            );
            state.execution_details = Some(details.clone());
        }
        (AgentResult::Text(text), _) => {
            state.push_message(
                Sender::Bot,
                MessageContent::Text(text.clone()),
                MessageKind::Text,
                agent_name,
            );
            if mode == Mode::Execution {
                state.execution_details = Some(ExecutionDetails::from_raw(text.clone()));
            }
        }
        (AgentResult::Empty, _) => state.push_error(EMPTY_RESPONSE_MESSAGE),
        (AgentResult::Structured { value, .. }, Mode::Dialogue) | (AgentResult::Malformed(value), _) => {
            log::warn!("Unexpected result format in {:?} mode: {}", mode, value);
            state.push_error(UNEXPECTED_FORMAT_MESSAGE);
        }
    }

    if let Some(graph) = &response.flow_update {
        let mut graph = graph.clone();
        let pruned = graph.prune_dangling_edges();
        if pruned > 0 {
            log::warn!("Dropped {} flow edge(s) pointing at unknown nodes", pruned);
        }
        state.replace_flow(graph);
        state.push_info(FLOW_UPDATED_MESSAGE);
    }
}
