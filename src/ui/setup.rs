use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::constants::*;
use crate::models::Mode;

/// Build the static page skeleton once. Everything dynamic is filled in by
/// `views::render_app`.
pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_APP_CONTAINER).is_some() {
        return Ok(());
    }

    let app = document.create_element("div")?;
    app.set_id(ID_APP_CONTAINER);
    app.set_class_name("app-container");

    let header = document.create_element("header")?;
    header.set_class_name("header");
    let title = document.create_element("h1")?;
    title.set_text_content(Some(APP_TITLE));
    let subtitle = document.create_element("p")?;
    subtitle.set_class_name("subtitle");
    subtitle.set_text_content(Some(APP_SUBTITLE));
    let status = document.create_element("div")?;
    status.set_id(ID_BACKEND_STATUS);
    status.set_class_name("backend-status yellow");
    status.set_text_content(Some("Backend: checking..."));
    header.append_child(&title)?;
    header.append_child(&subtitle)?;
    header.append_child(&status)?;

    let workspace = document.create_element("div")?;
    workspace.set_class_name("workspace");
    workspace.set_inner_html(&format!(
        r#"
        <section class="chat-panel">
            <div class="panel-header">
                <h2>Agent interaction</h2>
                <p class="panel-description">Choose the interaction mode and send your task.</p>
                <div class="tabs">
                    <button type="button" id="{dialogue_tab}" class="{tab}">{dialogue_label}</button>
                    <button type="button" id="{execution_tab}" class="{tab}">{execution_label}</button>
                </div>
                <button type="button" id="{clear}" class="clear-button">Clear chat</button>
            </div>
            <div id="{messages}" class="messages"></div>
            <div class="chat-input-area">
                <textarea id="{input}" class="chat-input" rows="2"></textarea>
                <button type="button" id="{send}" class="send-button">Send</button>
            </div>
        </section>
        <section class="execution-panel">
            <div class="panel-header">
                <h2>Execution panel / details</h2>
                <p class="panel-description">Detailed results and feedback from execution mode.</p>
            </div>
            <div id="{details}" class="execution-panel-content"></div>
        </section>
        "#,
        dialogue_tab = ID_MODE_DIALOGUE_TAB,
        dialogue_label = Mode::Dialogue.label(),
        execution_label = Mode::Execution.label(),
        execution_tab = ID_MODE_EXECUTION_TAB,
        tab = CSS_TAB_BUTTON,
        clear = ID_CLEAR_BUTTON,
        messages = ID_MESSAGES,
        input = ID_CHAT_INPUT,
        send = ID_SEND_BUTTON,
        details = ID_EXECUTION_PANEL,
    ));

    let flow_panel = document.create_element("section")?;
    flow_panel.set_class_name("flow-panel");
    flow_panel.set_inner_html(&format!(
        r#"
        <div class="panel-header">
            <h2>Flow visualization</h2>
            <p class="panel-description">Follow the agents' decision and execution flow. Drag nodes to move them, drag the background to pan, shift-drag between nodes to connect them.</p>
        </div>
        <div id="{container}" class="flow-container">
            <canvas id="{canvas}"></canvas>
            <div class="flow-controls">
                <button type="button" id="{zoom_in}" title="Zoom in">+</button>
                <button type="button" id="{zoom_out}" title="Zoom out">-</button>
                <button type="button" id="{fit}" title="Fit view">Fit</button>
            </div>
        </div>
        "#,
        container = ID_FLOW_CONTAINER,
        canvas = ID_FLOW_CANVAS,
        zoom_in = ID_FLOW_ZOOM_IN,
        zoom_out = ID_FLOW_ZOOM_OUT,
        fit = ID_FLOW_FIT,
    ));

    app.append_child(&header)?;
    app.append_child(&workspace)?;
    app.append_child(&flow_panel)?;

    let body = document.body().ok_or(JsValue::from_str("No body found"))?;
    body.append_child(&app)?;

    Ok(())
}
