use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent};

use crate::constants::*;
use crate::messages::Message;
use crate::models::Mode;
use crate::state::dispatch_global_message;

pub fn setup_event_handlers(document: &Document) -> Result<(), JsValue> {
    setup_mode_tab(document, ID_MODE_DIALOGUE_TAB, Mode::Dialogue)?;
    setup_mode_tab(document, ID_MODE_EXECUTION_TAB, Mode::Execution)?;
    setup_click(document, ID_SEND_BUTTON, || Message::SubmitInput)?;
    setup_click(document, ID_CLEAR_BUTTON, || Message::ClearChat)?;
    setup_chat_input(document)?;

    // Flow controls bar
    setup_click(document, ID_FLOW_ZOOM_IN, || Message::ZoomFlow { factor: FLOW_ZOOM_STEP })?;
    setup_click(document, ID_FLOW_ZOOM_OUT, || Message::ZoomFlow {
        factor: 1.0 / FLOW_ZOOM_STEP,
    })?;
    setup_click(document, ID_FLOW_FIT, || Message::FitFlowView)?;
    Ok(())
}

fn require(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

fn setup_mode_tab(document: &Document, id: &str, mode: Mode) -> Result<(), JsValue> {
    setup_click(document, id, move || Message::SwitchMode(mode))
}

fn setup_click<F>(document: &Document, id: &str, make_msg: F) -> Result<(), JsValue>
where
    F: Fn() -> Message + 'static,
{
    let el = require(document, id)?;
    let handler = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(make_msg());
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn setup_chat_input(document: &Document) -> Result<(), JsValue> {
    let input = require(document, ID_CHAT_INPUT)?;

    // Keep state in sync with what the user types
    let input_handler = Closure::wrap(Box::new(move |e: Event| {
        let value = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
            .map(|ta| ta.value());
        if let Some(value) = value {
            dispatch_global_message(Message::UpdateInputText(value));
        }
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("input", input_handler.as_ref().unchecked_ref())?;
    input_handler.forget();

    // Enter submits, Shift+Enter inserts a newline
    let keydown_handler = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Enter" && !e.shift_key() {
            e.prevent_default();
            dispatch_global_message(Message::SubmitInput);
        }
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("keydown", keydown_handler.as_ref().unchecked_ref())?;
    keydown_handler.forget();

    Ok(())
}
