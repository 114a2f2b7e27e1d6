// Chat copy - the single source of truth for user-visible strings
pub const APP_TITLE: &str = "Hybrid Autonomous Agent Platform";
pub const APP_SUBTITLE: &str = "Dialogue agents, task agents and their execution flow";
pub const DEFAULT_ERROR_MESSAGE: &str = "Error processing the request.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Empty response from server.";
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected result format from server.";
pub const FLOW_UPDATED_MESSAGE: &str = "Flow graph updated.";
pub const CHAT_CLEARED_MESSAGE: &str = "Chat cleared. The flow graph was reset.";
pub const ENGINES_UNAVAILABLE_MESSAGE: &str =
    "Notice: the backend agent engines are unavailable, responses will be simulated.";
pub const PROCESSING_LABEL: &str = "Processing...";

// Backend routes
pub const DIALOGUE_AGENT_PATH: &str = "/api/run-dialogue-agent";
pub const TASK_AGENT_PATH: &str = "/api/run-task-agent";
pub const HEALTH_PATH: &str = "/api/health";

// Initial flow graph
pub const INITIAL_NODE_ID: &str = "1";
pub const INITIAL_NODE_LABEL: &str = "Flow start";
pub const INITIAL_NODE_X: f64 = 250.0;
pub const INITIAL_NODE_Y: f64 = 5.0;

// Flow node geometry (world units)
pub const FLOW_NODE_WIDTH: f64 = 150.0;
pub const FLOW_NODE_HEIGHT: f64 = 40.0;
pub const FLOW_NODE_RADIUS: f64 = 6.0;
pub const FLOW_LABEL_MAX_GRAPHEMES: usize = 22;
pub const FIT_VIEW_PADDING: f64 = 40.0;
pub const FIT_VIEW_MAX_ZOOM: f64 = 1.0;
pub const FIT_VIEW_MIN_ZOOM: f64 = 0.1;
// Manual zoom from the controls may go past the fit-view cap
pub const FLOW_MAX_ZOOM: f64 = 2.0;
pub const FLOW_ZOOM_STEP: f64 = 1.2;
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 300.0;

// Canvas colours
pub const CANVAS_BACKGROUND_COLOR: &str = "#ffffff";
pub const CANVAS_DOT_COLOR: &str = "#d4d4d8";
pub const CANVAS_DOT_GAP: f64 = 12.0;
pub const NODE_FILL_INPUT: &str = "#dbeafe";
pub const NODE_FILL_DEFAULT: &str = "#f4f4f5";
pub const NODE_FILL_OUTPUT: &str = "#dcfce7";
pub const NODE_BORDER_DEFAULT: &str = "#1a192b";
pub const NODE_BORDER_SELECTED: &str = "#2563eb";
pub const NODE_TEXT_COLOR: &str = "#18181b";
pub const CONNECTION_LINE_COLOR: &str = "#b1b1b7";
pub const CONNECTION_PREVIEW_COLOR: &str = "#2563eb";

// DOM ids
pub const ID_APP_CONTAINER: &str = "app-container";
pub const ID_MODE_DIALOGUE_TAB: &str = "mode-dialogue-tab";
pub const ID_MODE_EXECUTION_TAB: &str = "mode-execution-tab";
pub const ID_MESSAGES: &str = "chat-messages";
pub const ID_CHAT_INPUT: &str = "chat-input";
pub const ID_SEND_BUTTON: &str = "chat-send";
pub const ID_CLEAR_BUTTON: &str = "chat-clear";
pub const ID_EXECUTION_PANEL: &str = "execution-panel-content";
pub const ID_FLOW_CONTAINER: &str = "flow-container";
pub const ID_FLOW_CANVAS: &str = "flow-canvas";
pub const ID_FLOW_ZOOM_IN: &str = "flow-zoom-in";
pub const ID_FLOW_ZOOM_OUT: &str = "flow-zoom-out";
pub const ID_FLOW_FIT: &str = "flow-fit-view";
pub const ID_BACKEND_STATUS: &str = "backend-status";

// CSS classes
pub const CSS_TAB_BUTTON: &str = "tab-button";
pub const CSS_TAB_BUTTON_ACTIVE: &str = "tab-button active";
pub const CSS_MESSAGE_ROW: &str = "message-row";
pub const CSS_BUBBLE: &str = "bubble";
