//! Jadugar API Client Library
//!
//! Sends requests to the Jadugar API with standard client headers and
//! normalizes error responses into [`ErrorModel`]

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{ClientConfig, Settings};
pub use models::ErrorModel;
pub use services::{ApiClient, RequestOptions};
pub use utils::error::{ClientError, ClientResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
