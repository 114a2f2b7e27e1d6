use serde::Serialize;
use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;

pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod reducers;
pub mod state;
pub mod update;

mod canvas;
mod command_executors;
mod components;
mod dom_utils;
mod logging;
mod ui;
mod views;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;

    // Static layout first, then the handlers that hang off it
    ui::setup::create_base_ui(&document)?;
    ui::events::setup_event_handlers(&document)?;
    components::flow_canvas::setup_flow_canvas(&document)?;

    log::info!(
        "Starting up, API base '{}'",
        network::api_config().base_url()
    );
    state::dispatch_global_message(messages::Message::AppStarted);
    Ok(())
}

/// Conversation, details panel and flow graph as a plain JS object.
#[wasm_bindgen]
pub fn conversation_snapshot() -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    state::APP_STATE.with(|state| {
        state
            .borrow()
            .snapshot()
            .serialize(&serializer)
            .map_err(JsValue::from)
    })
}
