pub mod api_client;
pub mod config;
pub mod contract;

// Re-export commonly used items
pub use api_client::ApiClient;
pub use config::{api_config, ApiConfig};
pub use contract::{AgentResponse, AgentResult, ApiError};
