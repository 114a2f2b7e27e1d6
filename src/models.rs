use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;

use crate::constants::*;

/// Interaction pattern selected by the tabs above the chat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Dialogue,
    Execution,
}

impl Mode {
    pub fn endpoint(self) -> &'static str {
        match self {
            Mode::Dialogue => DIALOGUE_AGENT_PATH,
            Mode::Execution => TASK_AGENT_PATH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Dialogue => "Dialogue mode",
            Mode::Execution => "Execution mode",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Dialogue => "Type your message for the dialogue...",
            Mode::Execution => "Describe the task to execute...",
        }
    }

    pub fn sending_notice(self) -> &'static str {
        match self {
            Mode::Dialogue => "Sending to the dialogue agent (dialogue mode)...",
            Mode::Execution => "Sending to the task agent (execution mode)...",
        }
    }

    pub fn panel_hint(self) -> &'static str {
        match self {
            Mode::Dialogue => "This panel shows additional details and agent output.",
            Mode::Execution => "Detailed execution results will appear here.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    Agent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Error,
    Info,
    Structured,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(serde_json::Value),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Structured(_) => None,
        }
    }
}

/// One bubble in the transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub content: MessageContent,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(rename = "agentName", skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub sent_at: DateTime<Utc>,
}

/// Summary of the most recent execution-mode result.
///
/// Any JSON object decodes. A known key is lifted into its field only when
/// its value has the expected type; everything else stays in `extra` under
/// its own name, so serializing gives back the object it was read from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ExecutionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    // Keys the panel does not know how to lay out; shown as JSON.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecutionDetails {
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

// Only a list made entirely of strings counts as steps.
fn take_steps(map: &mut Map<String, Value>) -> Option<Vec<String>> {
    let steps: Vec<String> = map
        .get("steps")?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<_>>()?;
    map.remove("steps");
    Some(steps)
}

impl From<Map<String, Value>> for ExecutionDetails {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            title: take_string(&mut map, "title"),
            summary: take_string(&mut map, "summary"),
            steps: take_steps(&mut map),
            raw: take_string(&mut map, "raw"),
            extra: map,
        }
    }
}

// ---------------------------------------------------------------------------
// Flow graph
// ---------------------------------------------------------------------------

/// Structural role of a node, mirrors the `type` field the backend sends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Input,
    Output,
    // Anything else the backend sends, including `"default"`
    #[default]
    #[serde(other)]
    Default,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub role: NodeRole,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default)]
    pub position: Position,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, role: NodeRole, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            role,
            data: NodeData { label: label.into() },
            position: Position { x, y },
        }
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Label cut to what fits in a node box, on grapheme boundaries.
    pub fn short_label(&self) -> String {
        let graphemes: Vec<&str> = self.label().graphemes(true).collect();
        if graphemes.len() <= FLOW_LABEL_MAX_GRAPHEMES {
            return self.label().to_string();
        }
        let mut out: String = graphemes[..FLOW_LABEL_MAX_GRAPHEMES - 1].concat();
        out.push('…');
        out
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.position.x
            && x <= self.position.x + FLOW_NODE_WIDTH
            && y >= self.position.y
            && y <= self.position.y + FLOW_NODE_HEIGHT
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub animated: bool,
}

impl FlowEdge {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: Some(format!("e{}-{}", source, target)),
            source: source.to_string(),
            target: target.to_string(),
            animated: false,
        }
    }
}

/// Axis-aligned box around every node, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// The single placeholder node shown before any backend update.
    pub fn initial() -> Self {
        Self {
            nodes: vec![FlowNode::new(
                INITIAL_NODE_ID,
                INITIAL_NODE_LABEL,
                NodeRole::Input,
                INITIAL_NODE_X,
                INITIAL_NODE_Y,
            )],
            edges: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Drops dangling edges and returns how many were removed.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let before = self.edges.len();
        let ids: Vec<String> = self.nodes.iter().map(|n| n.id.clone()).collect();
        self.edges
            .retain(|e| ids.contains(&e.source) && ids.contains(&e.target));
        before - self.edges.len()
    }

    /// Topmost node under a world-space point. Later nodes draw on top, so
    /// they win.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&FlowNode> {
        self.nodes.iter().rev().find(|n| n.contains(x, y))
    }

    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.position = Position { x, y };
                true
            }
            None => false,
        }
    }

    /// Adds an edge between two existing nodes. Self-loops and duplicates are
    /// refused.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        if source == target || !self.contains_node(source) || !self.contains_node(target) {
            return false;
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return false;
        }
        self.edges.push(FlowEdge::between(source, target));
        true
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let mut bounds = Bounds {
            min_x: first.position.x,
            min_y: first.position.y,
            max_x: first.position.x + FLOW_NODE_WIDTH,
            max_y: first.position.y + FLOW_NODE_HEIGHT,
        };
        for node in &self.nodes[1..] {
            bounds.min_x = bounds.min_x.min(node.position.x);
            bounds.min_y = bounds.min_y.min(node.position.y);
            bounds.max_x = bounds.max_x.max(node.position.x + FLOW_NODE_WIDTH);
            bounds.max_y = bounds.max_y.max(node.position.y + FLOW_NODE_HEIGHT);
        }
        Some(bounds)
    }
}

/// Response of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub engines_available: bool,
}
