// The events that can occur in the UI, and the side effects they request.
//
use crate::models::{HealthStatus, Mode};
use crate::network::{AgentResponse, ApiError};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Start-up
    AppStarted,
    BackendHealthChecked(Result<HealthStatus, ApiError>),

    // Chat panel
    SwitchMode(Mode),
    UpdateInputText(String),   // Mirror of the textarea
    SubmitInput,               // Submit whatever the textarea holds
    ClearChat,

    // Request outcomes, tagged with the sequence number they were issued with
    AgentResponseReceived {
        seq: u64,
        mode: Mode,
        response: AgentResponse,
    },
    AgentRequestFailed {
        seq: u64,
        error: ApiError,
    },

    // Flow canvas. Coordinates are world units unless noted.
    SelectNode(Option<String>),
    StartNodeDrag {
        node_id: String,
        offset_x: f64,
        offset_y: f64,
    },
    UpdateNodeDrag {
        x: f64,
        y: f64,
    },
    StopNodeDrag,
    BeginConnection {
        source: String,
    },
    UpdateConnectionPreview {
        x: f64,
        y: f64,
    },
    FinishConnection {
        target: Option<String>,
    },
    // Background drag, in screen pixels
    StartPan {
        x: f64,
        y: f64,
    },
    UpdatePan {
        x: f64,
        y: f64,
    },
    StopPan,
    // Canvas size in CSS pixels
    ResizeFlowCanvas {
        width: f64,
        height: f64,
    },
    // Controls bar
    ZoomFlow {
        factor: f64,
    },
    FitFlowView,
}

/// Commands represent side effects that should be executed after state updates.
/// This separates pure state changes from effects like API calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// POST the task to the endpoint of `mode`
    RunAgent { seq: u64, mode: Mode, task: String },

    /// GET the backend health endpoint
    CheckHealth,
}
