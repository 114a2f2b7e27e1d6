// Render every part of the page from the current application state.
//
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::components::{chat_view, execution_panel, flow_canvas};
use crate::constants::ID_BACKEND_STATUS;
use crate::state::AppState;

pub fn render_app(state: &AppState, document: &Document) -> Result<(), JsValue> {
    chat_view::render_chat(state, document)?;
    execution_panel::render_execution_panel(state, document)?;
    flow_canvas::render_flow(state);
    render_backend_status(state, document);
    Ok(())
}

/// Text and colour class of the header status badge.
pub fn backend_status(state: &AppState) -> (&'static str, &'static str) {
    match &state.backend_health {
        None => ("Backend: checking...", "yellow"),
        Some(Ok(health)) if health.engines_available => ("Backend: ready", "green"),
        Some(Ok(_)) => ("Backend: engines unavailable", "yellow"),
        Some(Err(_)) => ("Backend: unreachable", "red"),
    }
}

fn render_backend_status(state: &AppState, document: &Document) {
    if let Some(status) = document.get_element_by_id(ID_BACKEND_STATUS) {
        let (text, color) = backend_status(state);
        status.set_text_content(Some(text));
        status.set_class_name(&format!("backend-status {}", color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthStatus;

    #[test]
    fn status_badge_tracks_health_check() {
        let mut state = AppState::new();
        assert_eq!(backend_status(&state).1, "yellow");

        state.backend_health = Some(Ok(HealthStatus { status: "ok".into(), engines_available: true }));
        assert_eq!(backend_status(&state), ("Backend: ready", "green"));

        state.backend_health = Some(Err("Failed to fetch".into()));
        assert_eq!(backend_status(&state).1, "red");
    }
}

// wasm-bindgen tests ----------------------------------------------------------
