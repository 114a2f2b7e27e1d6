use std::cell::RefCell;

use wasm_bindgen::prelude::*;

/// API route configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a new ApiConfig from the API_BASE_URL build-time variable.
    ///
    /// Without it the config is relative: requests go to the origin the page
    /// was served from, which is how the backend is normally proxied.
    pub fn new() -> Self {
        match option_env!("API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self::default(),
        }
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for all API calls
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an absolute API path such as `/api/health`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

thread_local! {
    static API_CONFIG: RefCell<ApiConfig> = RefCell::new(ApiConfig::new());
}

pub fn api_config() -> ApiConfig {
    API_CONFIG.with(|cfg| cfg.borrow().clone())
}

pub fn set_api_config(config: ApiConfig) {
    API_CONFIG.with(|cfg| *cfg.borrow_mut() = config);
}

/// Runtime override for the backend location, callable from the host page
/// before or after start-up.
#[wasm_bindgen]
pub fn init_api_config_js(url: &str) {
    let config = ApiConfig::from_url(url);
    log::info!("API base URL set to '{}'", config.base_url());
    set_api_config(config);
}
