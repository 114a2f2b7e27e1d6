use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::constants::*;
use crate::dom_utils::{append_text, element_with_text, set_active, set_disabled, set_inactive, textarea};
use crate::models::{ChatMessage, MessageContent, MessageKind, Mode, Sender};
use crate::state::AppState;

/// What the transcript was last rendered from. Canvas interaction dispatches
/// often; the transcript is only rebuilt when this changes.
#[derive(Clone, Debug, Default, PartialEq)]
struct TranscriptKey {
    len: usize,
    last_id: Option<String>,
    loading: bool,
}

thread_local! {
    static RENDERED: RefCell<Option<TranscriptKey>> = const { RefCell::new(None) };
}

pub fn render_chat(state: &AppState, document: &Document) -> Result<(), JsValue> {
    render_mode_tabs(state.mode, document);
    render_input(state, document)?;

    let key = TranscriptKey {
        len: state.history.len(),
        last_id: state.history.last().map(|m| m.id.clone()),
        loading: state.is_loading(),
    };
    let unchanged = RENDERED.with(|r| r.borrow().as_ref() == Some(&key));
    if unchanged {
        return Ok(());
    }

    let container = match document.get_element_by_id(ID_MESSAGES) {
        Some(c) => c,
        None => return Ok(()), // Layout not created yet
    };
    container.set_inner_html("");
    for msg in &state.history {
        let row = message_row(document, msg)?;
        container.append_child(&row)?;
    }
    if state.is_loading() {
        let row = element_with_text(document, "div", &format!("{} bot", CSS_MESSAGE_ROW), None)?;
        let bubble = element_with_text(
            document,
            "div",
            &format!("{} processing", CSS_BUBBLE),
            Some(PROCESSING_LABEL),
        )?;
        row.append_child(&bubble)?;
        container.append_child(&row)?;
    }
    container.set_scroll_top(container.scroll_height());

    RENDERED.with(|r| *r.borrow_mut() = Some(key));
    Ok(())
}

fn render_mode_tabs(mode: Mode, document: &Document) {
    let (active, inactive) = match mode {
        Mode::Dialogue => (ID_MODE_DIALOGUE_TAB, ID_MODE_EXECUTION_TAB),
        Mode::Execution => (ID_MODE_EXECUTION_TAB, ID_MODE_DIALOGUE_TAB),
    };
    if let Some(btn) = document.get_element_by_id(active) {
        set_active(&btn);
    }
    if let Some(btn) = document.get_element_by_id(inactive) {
        set_inactive(&btn);
    }
}

fn render_input(state: &AppState, document: &Document) -> Result<(), JsValue> {
    if let Some(input) = textarea(document, ID_CHAT_INPUT) {
        input.set_placeholder(state.mode.placeholder());
        input.set_disabled(state.is_loading());
        // Only write back when different, otherwise the caret jumps
        if input.value() != state.input_text {
            input.set_value(&state.input_text);
        }
    }
    if let Some(send) = document.get_element_by_id(ID_SEND_BUTTON) {
        set_disabled(&send, state.is_loading() || state.input_text.trim().is_empty())?;
    }
    Ok(())
}

/// CSS modifier for a bubble: user, error, info, structured or plain bot.
pub fn bubble_class(msg: &ChatMessage) -> &'static str {
    match (msg.sender, msg.kind) {
        (Sender::User, _) => "user",
        (_, MessageKind::Error) => "error",
        (_, MessageKind::Info) => "info",
        (_, MessageKind::Structured) => "structured",
        (_, MessageKind::Text) => "bot",
    }
}

fn message_row(document: &Document, msg: &ChatMessage) -> Result<Element, JsValue> {
    let side = if msg.sender == Sender::User { "user" } else { "bot" };
    let row = element_with_text(document, "div", &format!("{} {}", CSS_MESSAGE_ROW, side), None)?;
    row.set_attribute("data-message-id", &msg.id)?;

    let bubble = element_with_text(
        document,
        "div",
        &format!("{} {}", CSS_BUBBLE, bubble_class(msg)),
        None,
    )?;

    if let Some(agent) = &msg.agent_name {
        append_text(document, &bubble, "p", "agent-name", Some(agent))?;
    }

    match &msg.content {
        MessageContent::Text(text) => {
            append_text(document, &bubble, "p", "content", Some(text))?;
        }
        MessageContent::Structured(value) => {
            let structured = structured_content(document, value)?;
            bubble.append_child(&structured)?;
        }
    }

    let time = msg.sent_at.format("%H:%M:%S").to_string();
    append_text(document, &bubble, "span", "timestamp", Some(&time))?;

    row.append_child(&bubble)?;
    Ok(row)
}

// Structured results show their title/summary when present and the full
// object underneath.
fn structured_content(document: &Document, value: &serde_json::Value) -> Result<Element, JsValue> {
    let wrapper = element_with_text(document, "div", "content structured", None)?;
    if let Some(title) = value.get("title").and_then(|v| v.as_str()) {
        append_text(document, &wrapper, "p", "structured-title", Some(title))?;
    }
    if let Some(summary) = value.get("summary").and_then(|v| v.as_str()) {
        append_text(document, &wrapper, "p", "structured-summary", Some(summary))?;
    }
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    append_text(document, &wrapper, "pre", "structured-json", Some(&pretty))?;
    Ok(wrapper)
}
