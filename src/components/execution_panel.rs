use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::ID_EXECUTION_PANEL;
use crate::dom_utils::{append_text, element_with_text};
use crate::models::ExecutionDetails;
use crate::state::AppState;

pub fn render_execution_panel(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let panel = match document.get_element_by_id(ID_EXECUTION_PANEL) {
        Some(p) => p,
        None => return Ok(()), // Panel not created yet
    };
    panel.set_inner_html("");

    let details = match &state.execution_details {
        Some(d) => d,
        None => {
            let hint = element_with_text(document, "p", "panel-hint", Some(state.mode.panel_hint()))?;
            panel.append_child(&hint)?;
            return Ok(());
        }
    };

    if let Some(title) = &details.title {
        append_text(document, &panel, "h3", "details-title", Some(title))?;
    }
    if let Some(summary) = &details.summary {
        append_text(document, &panel, "p", "details-summary", Some(summary))?;
    }
    if let Some(steps) = &details.steps {
        let list = element_with_text(document, "ol", "details-steps", None)?;
        for step in steps {
            append_text(document, &list, "li", "", Some(step))?;
        }
        panel.append_child(&list)?;
    }
    if let Some(raw) = &details.raw {
        append_text(document, &panel, "pre", "details-raw", Some(raw))?;
    }
    if let Some(extra) = extra_json(details) {
        append_text(document, &panel, "pre", "details-extra", Some(&extra))?;
    }
    Ok(())
}

/// Pretty JSON of the keys the panel has no dedicated slot for.
pub fn extra_json(details: &ExecutionDetails) -> Option<String> {
    if details.extra.is_empty() {
        return None;
    }
    serde_json::to_string_pretty(&details.extra).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_json_only_for_unknown_keys() {
        assert!(extra_json(&ExecutionDetails::from_raw("text")).is_none());

        let details: ExecutionDetails =
            serde_json::from_str(r#"{"title": "t", "duration_ms": 1200}"#).unwrap();
        let extra = extra_json(&details).unwrap();
        assert!(extra.contains("duration_ms"));
        assert!(!extra.contains("title"));
    }
}
