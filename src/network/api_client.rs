use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::config::api_config;
use super::contract::{self, AgentResponse, ApiError, TaskRequest};
use crate::models::{HealthStatus, Mode};

// REST client for the agent backend
pub struct ApiClient;

impl ApiClient {
    /// Send one task to the agent behind `mode`. Single attempt, no retry.
    pub async fn run_agent(mode: Mode, task: &str) -> Result<AgentResponse, ApiError> {
        let url = api_config().url(mode.endpoint());
        let body = serde_json::to_string(&TaskRequest { task })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let text = Self::fetch_text(&url, "POST", Some(&body)).await?;
        contract::decode_agent_response(&text)
    }

    pub async fn check_health() -> Result<HealthStatus, ApiError> {
        let url = api_config().url(crate::constants::HEALTH_PATH);
        let text = Self::fetch_text(&url, "GET", None).await?;
        contract::decode_health(&text)
    }

    // Helper function to make fetch requests. Non-2xx answers still have
    // their body read so the server's `error` field can be surfaced.
    pub async fn fetch_text(url: &str, method: &str, body: Option<&str>) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(js_error)?;
        headers.append("Accept", "application/json").map_err(js_error)?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers
                .append("Content-Type", "application/json")
                .map_err(js_error)?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| ApiError::transport("no global window exists"))?;

        crate::debug_log!("{} {}", method, url);
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map_err(js_error)?
                .as_string()
                .unwrap_or_default(),
            Err(e) => return Err(js_error(e)),
        };

        if !resp.ok() {
            log::warn!("{} {} failed with status {}", method, url, resp.status());
            return Err(ApiError::from_status(resp.status(), &text));
        }
        Ok(text)
    }
}

/// Turn a rejected promise or thrown value into a transport error, keeping
/// the JS `Error.message` when there is one.
fn js_error(value: JsValue) -> ApiError {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return ApiError::transport(String::from(err.message()));
    }
    match value.as_string() {
        Some(s) => ApiError::transport(s),
        None => ApiError::transport(format!("{:?}", value)),
    }
}
