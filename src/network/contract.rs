//! Wire shapes of the agent endpoints and their decoding into typed results.
//!
//! `result` is loosely typed on the wire (string or object). It is decoded
//! once, here, into [`AgentResult`] so reducers never inspect raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{ExecutionDetails, FlowEdge, FlowGraph, FlowNode, HealthStatus};

#[derive(Debug, Serialize)]
pub struct TaskRequest<'a> {
    pub task: &'a str,
}

#[derive(Debug, Deserialize)]
struct RawAgentResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    agent_used: Option<String>,
    #[serde(default)]
    flow_update: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawFlowUpdate {
    nodes: Option<Vec<FlowNode>>,
    edges: Option<Vec<FlowEdge>>,
}

#[derive(Debug, Deserialize)]
struct RawErrorBody {
    error: Option<String>,
}

/// Decoded `result` field.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentResult {
    Text(String),
    /// A JSON object; `details` is the same object read as execution details.
    Structured {
        value: Value,
        details: ExecutionDetails,
    },
    /// Present but neither text nor an object.
    Malformed(Value),
    /// Missing, `null` or the empty string.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AgentResponse {
    pub result: AgentResult,
    pub agent_used: Option<String>,
    pub flow_update: Option<FlowGraph>,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    /// Non-2xx answer. `detail` is the server's `error` field when it sent
    /// one.
    #[error("Server error: {status} - {detail}")]
    Status { status: u16, detail: String },
    #[error("{0}")]
    Transport(String),
    #[error("Could not read the server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the status variant from a failed response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = server_error_field(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        ApiError::Status { status, detail }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport(message.into())
    }

    /// Chat text for this failure, never empty.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            crate::constants::DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            text
        }
    }
}

fn server_error_field(body: &str) -> Option<String> {
    serde_json::from_str::<RawErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

pub fn classify_result(result: Option<Value>) -> AgentResult {
    match result {
        None | Some(Value::Null) => AgentResult::Empty,
        Some(Value::String(s)) if s.is_empty() => AgentResult::Empty,
        Some(Value::String(s)) => AgentResult::Text(s),
        Some(Value::Object(map)) => AgentResult::Structured {
            details: ExecutionDetails::from(map.clone()),
            value: Value::Object(map),
        },
        Some(other) => AgentResult::Malformed(other),
    }
}

/// A flow update counts only when it carries both `nodes` and `edges`.
fn decode_flow_update(raw: Value) -> Option<FlowGraph> {
    match serde_json::from_value::<RawFlowUpdate>(raw) {
        Ok(RawFlowUpdate {
            nodes: Some(nodes),
            edges: Some(edges),
        }) => Some(FlowGraph { nodes, edges }),
        Ok(_) => {
            log::debug!("flow_update without both nodes and edges ignored");
            None
        }
        Err(e) => {
            log::warn!("ignoring undecodable flow_update: {}", e);
            None
        }
    }
}

pub fn decode_agent_response(body: &str) -> Result<AgentResponse, ApiError> {
    if body.trim().is_empty() {
        return Ok(AgentResponse {
            result: AgentResult::Empty,
            agent_used: None,
            flow_update: None,
        });
    }
    let raw: RawAgentResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(AgentResponse {
        result: classify_result(raw.result),
        agent_used: raw.agent_used.filter(|a| !a.is_empty()),
        flow_update: raw.flow_update.and_then(decode_flow_update),
    })
}

pub fn decode_health(body: &str) -> Result<HealthStatus, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(v: Value) -> AgentResponse {
        decode_agent_response(&v.to_string()).unwrap()
    }

    #[test]
    fn string_result_is_text() {
        let r = decode(json!({"result": "hello", "agent_used": "AutoGen"}));
        assert_eq!(r.result, AgentResult::Text("hello".into()));
        assert_eq!(r.agent_used.as_deref(), Some("AutoGen"));
        assert!(r.flow_update.is_none());
    }

    #[test]
    fn object_result_is_structured_with_details() {
        let r = decode(json!({"result": {
            "title": "Report", "steps": ["plan", "run"], "cost": 3
        }}));
        match r.result {
            AgentResult::Structured { value, details } => {
                assert_eq!(details.title.as_deref(), Some("Report"));
                assert_eq!(details.steps, Some(vec!["plan".to_string(), "run".to_string()]));
                assert_eq!(details.extra.get("cost"), Some(&json!(3)));
                assert_eq!(value["title"], "Report");
            }
            other => panic!("expected structured, got {:?}", other),
        }
    }

    #[test]
    fn any_object_is_structured_and_round_trips() {
        for payload in [
            json!({"title": "Report", "steps": [{"agent": "researcher", "output": "done"}]}),
            json!({"title": 42, "summary": "x"}),
            json!({"title": null, "summary": "x"}),
            json!({"steps": 3}),
            json!({}),
        ] {
            match decode(json!({ "result": payload.clone() })).result {
                AgentResult::Structured { value, details } => {
                    assert_eq!(value, payload);
                    assert_eq!(serde_json::to_value(&details).unwrap(), payload);
                }
                other => panic!("expected structured for {}, got {:?}", payload, other),
            }
        }
    }

    #[test]
    fn non_text_scalars_and_arrays_are_malformed() {
        assert!(matches!(decode(json!({"result": 42})).result, AgentResult::Malformed(_)));
        assert!(matches!(decode(json!({"result": [1, 2]})).result, AgentResult::Malformed(_)));
        assert!(matches!(decode(json!({"result": true})).result, AgentResult::Malformed(_)));
    }

    #[test]
    fn missing_null_and_empty_results_are_empty() {
        assert_eq!(decode(json!({})).result, AgentResult::Empty);
        assert_eq!(decode(json!({"result": null})).result, AgentResult::Empty);
        assert_eq!(decode(json!({"result": ""})).result, AgentResult::Empty);
        assert_eq!(decode_agent_response("  ").unwrap().result, AgentResult::Empty);
    }

    #[test]
    fn flow_update_needs_both_nodes_and_edges() {
        let full = decode(json!({"result": "ok", "flow_update": {
            "nodes": [
                {"id": "1", "type": "input", "data": {"label": "Start"}, "position": {"x": 50, "y": 5}},
                {"id": "2", "data": {"label": "Agent"}, "position": {"x": 50, "y": 100}}
            ],
            "edges": [{"id": "e1-2", "source": "1", "target": "2", "animated": true}]
        }}));
        let graph = full.flow_update.unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges[0].animated);

        let nodes_only = decode(json!({"result": "ok", "flow_update": {"nodes": []}}));
        assert!(nodes_only.flow_update.is_none());
    }

    #[test]
    fn broken_flow_update_does_not_sink_the_response() {
        let r = decode(json!({"result": "ok", "flow_update": {"nodes": "nope", "edges": []}}));
        assert_eq!(r.result, AgentResult::Text("ok".into()));
        assert!(r.flow_update.is_none());
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_agent_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.user_message().starts_with("Could not read the server response"));
    }

    #[test]
    fn status_error_prefers_server_error_field() {
        let err = ApiError::from_status(400, r#"{"error": "No task provided"}"#);
        assert_eq!(err.user_message(), "Server error: 400 - No task provided");

        let err = ApiError::from_status(502, "Bad Gateway");
        assert_eq!(
            err.user_message(),
            "Server error: 502 - Request failed with status code 502"
        );
    }

    #[test]
    fn blank_transport_message_falls_back_to_generic_text() {
        assert_eq!(
            ApiError::transport("  ").user_message(),
            crate::constants::DEFAULT_ERROR_MESSAGE
        );
        assert_eq!(ApiError::transport("Network Error").user_message(), "Network Error");
    }

    #[test]
    fn health_body_decodes() {
        let h = decode_health(r#"{"status": "ok", "engines_available": false}"#).unwrap();
        assert_eq!(h.status, "ok");
        assert!(!h.engines_available);
    }
}
