use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::constants::*;
use crate::messages::Message;
use crate::models::{
    ChatMessage, ExecutionDetails, FlowGraph, HealthStatus, MessageContent, MessageKind, Mode,
    Sender,
};
use crate::update::update;

/// Pan/zoom of the flow canvas. `x`/`y` is the world point drawn at the
/// canvas' top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (screen_x / self.zoom + self.x, screen_y / self.zoom + self.y)
    }

    pub fn to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        ((world_x - self.x) * self.zoom, (world_y - self.y) * self.zoom)
    }

    /// Scale by `factor` keeping the world point under (`screen_x`, `screen_y`)
    /// where it is.
    pub fn zoom_about(&mut self, factor: f64, screen_x: f64, screen_y: f64) {
        let (world_x, world_y) = self.to_world(screen_x, screen_y);
        self.zoom = (self.zoom * factor).clamp(FIT_VIEW_MIN_ZOOM, FLOW_MAX_ZOOM);
        self.x = world_x - screen_x / self.zoom;
        self.y = world_y - screen_y / self.zoom;
    }

    pub fn pan_by(&mut self, screen_dx: f64, screen_dy: f64) {
        self.x -= screen_dx / self.zoom;
        self.y -= screen_dy / self.zoom;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub node_id: String,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Edge being drawn with shift-drag, not yet attached to a target.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingConnection {
    pub source: String,
    pub cursor: Option<(f64, f64)>,
}

// Store global application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub mode: Mode,
    pub input_text: String,
    pub history: Vec<ChatMessage>,
    pub execution_details: Option<ExecutionDetails>,
    pub flow: FlowGraph,

    // Flow canvas interaction
    pub selected_node_id: Option<String>,
    pub dragging: Option<DragState>,
    pub connecting: Option<PendingConnection>,
    // Last cursor position of a background drag, screen pixels
    pub panning: Option<(f64, f64)>,
    pub viewport: Viewport,
    pub canvas_width: f64,
    pub canvas_height: f64,

    // Start-up health check, `None` until it settles
    pub backend_health: Option<Result<HealthStatus, String>>,

    // Latest issued request sequence; anything older is stale
    latest_seq: u64,
    in_flight: Option<u64>,
    message_counter: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut state = Self {
            mode: Mode::default(),
            input_text: String::new(),
            history: Vec::new(),
            execution_details: None,
            flow: FlowGraph::initial(),
            selected_node_id: None,
            dragging: None,
            connecting: None,
            panning: None,
            viewport: Viewport::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            backend_health: None,
            latest_seq: 0,
            in_flight: None,
            message_counter: 0,
        };
        state.fit_flow_to_view();
        state
    }

    /// True strictly between a submission and the settlement of the latest
    /// request.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Start a new request and return its sequence number. Any request still
    /// in flight becomes stale.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.in_flight = Some(self.latest_seq);
        self.latest_seq
    }

    /// Make every outstanding request stale without starting a new one.
    pub fn invalidate_requests(&mut self) {
        self.latest_seq += 1;
        self.in_flight = None;
    }

    /// Settle request `seq`. Returns false when it is stale, in which case
    /// the caller must drop the outcome.
    pub fn settle_request(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    // Time-derived, with a per-session counter so two messages created in the
    // same millisecond still differ.
    fn next_message_id(&mut self, now: DateTime<Utc>) -> String {
        self.message_counter += 1;
        format!("msg-{}-{}", now.timestamp_millis(), self.message_counter)
    }

    pub fn push_message(
        &mut self,
        sender: Sender,
        content: MessageContent,
        kind: MessageKind,
        agent_name: Option<String>,
    ) {
        let now = Utc::now();
        let id = self.next_message_id(now);
        self.history.push(ChatMessage {
            id,
            sender,
            content,
            kind,
            agent_name,
            sent_at: now,
        });
    }

    pub fn push_text(&mut self, sender: Sender, text: impl Into<String>, kind: MessageKind) {
        self.push_message(sender, MessageContent::Text(text.into()), kind, None);
    }

    pub fn push_info(&mut self, text: impl Into<String>) {
        self.push_text(Sender::Bot, text, MessageKind::Info);
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push_text(Sender::Bot, text, MessageKind::Error);
    }

    /// Swap in a new graph and forget interaction state tied to the old one.
    pub fn replace_flow(&mut self, flow: FlowGraph) {
        self.flow = flow;
        self.selected_node_id = None;
        self.dragging = None;
        self.connecting = None;
        self.panning = None;
        self.fit_flow_to_view();
    }

    // Apply transform to ensure all nodes are visible
    pub fn fit_flow_to_view(&mut self) {
        let bounds = match self.flow.bounds() {
            Some(b) => b,
            None => {
                self.viewport = Viewport::default();
                return;
            }
        };
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return;
        }

        let required_width = bounds.width() + 2.0 * FIT_VIEW_PADDING;
        let required_height = bounds.height() + 2.0 * FIT_VIEW_PADDING;
        let zoom = f64::min(
            self.canvas_width / required_width,
            self.canvas_height / required_height,
        )
        .clamp(FIT_VIEW_MIN_ZOOM, FIT_VIEW_MAX_ZOOM);

        // Center the content
        let center_x = bounds.min_x + bounds.width() / 2.0;
        let center_y = bounds.min_y + bounds.height() / 2.0;
        self.viewport = Viewport {
            x: center_x - self.canvas_width / (2.0 * zoom),
            y: center_y - self.canvas_height / (2.0 * zoom),
            zoom,
        };
    }

    /// Serializable view of the state, handed to JS by `conversation_snapshot`.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode,
            is_loading: self.is_loading(),
            history: &self.history,
            execution_details: self.execution_details.as_ref(),
            flow: &self.flow,
        }
    }

    // Separate method to refresh UI after state changes
    pub fn refresh_ui_after_state_change() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or(JsValue::from_str("No window"))?;
        let document = window.document().ok_or(JsValue::from_str("No document"))?;
        APP_STATE.with(|state| {
            let state = state.borrow();
            crate::views::render_app(&state, &document)
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub is_loading: bool,
    pub history: &'a [ChatMessage],
    pub execution_details: Option<&'a ExecutionDetails>,
    pub flow: &'a FlowGraph,
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

// Global helper function for dispatching messages with proper UI refresh handling
pub fn dispatch_global_message(msg: Message) {
    // Run the reducer inside its own borrow; executors and renderers borrow
    // again.
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        update(&mut state, msg)
    });

    if let Err(e) = AppState::refresh_ui_after_state_change() {
        log::warn!("Failed to refresh UI after action: {:?}", e);
    }

    for cmd in commands {
        crate::command_executors::execute(cmd);
    }
}
