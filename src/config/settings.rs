//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use super::file::FileConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version reported when none is configured
pub const DEFAULT_CLIENT_VERSION: &str = "1.0.0";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API client configuration
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Bearer token (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Version reported in `X-Client-Version`
    pub version: String,
    /// Request timeout in seconds (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            version: DEFAULT_CLIENT_VERSION.to_string(),
            timeout_secs: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

impl Settings {
    /// Create a new configuration instance
    ///
    /// Reads the default configuration file if one exists, then applies
    /// `.env` and environment variable overrides.
    pub fn new() -> Result<Self> {
        Self::load(None, None)
    }

    /// Create a configuration instance from an explicit configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(Some(path), None)
    }

    /// Load settings for a single invocation
    ///
    /// `config_path` replaces the default file search. `base_url` takes
    /// precedence over both the environment and the file.
    pub fn load(config_path: Option<&Path>, base_url: Option<String>) -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let file = match config_path {
            Some(path) => Some(FileConfig::load(path)?),
            None => FileConfig::load_default()?,
        };
        Self::from_sources_with_base_url(file, base_url)
    }

    /// Merge file values with environment overrides and validate the result
    pub fn from_sources(file: Option<FileConfig>) -> Result<Self> {
        Self::from_sources_with_base_url(file, None)
    }

    /// Like [`Settings::from_sources`], with an explicit base URL that wins over every source
    pub fn from_sources_with_base_url(
        file: Option<FileConfig>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let base_url = base_url
            .or_else(|| get_env("JADUGAR_BASE_URL"))
            .or(file.base_url)
            .context("JADUGAR_BASE_URL environment variable not set")?;

        let timeout_secs = match get_env("JADUGAR_TIMEOUT") {
            Some(value) => Some(value.parse().context("Invalid timeout value")?),
            None => file.timeout,
        };

        let settings = Self {
            client: ClientConfig {
                base_url,
                api_key: get_env("JADUGAR_API_KEY").or(file.api_key),
                version: get_env("JADUGAR_CLIENT_VERSION")
                    .or(file.version)
                    .unwrap_or_else(|| DEFAULT_CLIENT_VERSION.to_string()),
                timeout_secs,
            },
            logging: LoggingConfig {
                level: get_env("RUST_LOG")
                    .or(file.logging.level)
                    .unwrap_or_else(|| "info".to_string()),
                format: get_env("LOG_FORMAT")
                    .or(file.logging.format)
                    .unwrap_or_else(|| "text".to_string()),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate URL format
        if self.client.base_url.is_empty() {
            anyhow::bail!("Jadugar base URL cannot be empty");
        }

        if !self.client.base_url.starts_with("http") {
            anyhow::bail!("Invalid Jadugar base URL format, should start with 'http'");
        }

        if let Some(api_key) = &self.client.api_key {
            if api_key.is_empty() {
                anyhow::bail!("Jadugar API key cannot be empty");
            }

            if api_key.contains(char::is_whitespace) {
                anyhow::bail!("Jadugar API key cannot contain whitespace characters");
            }
        }

        if self.client.version.is_empty() {
            anyhow::bail!("Client version cannot be empty");
        }

        if self.client.timeout_secs == Some(0) {
            anyhow::bail!("Timeout value cannot be 0");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable if set
fn get_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
