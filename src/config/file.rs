//! File-based configuration loading
//!
//! Loads client configuration from a JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Client configuration loaded from JSON file
///
/// Every field is optional; environment variables take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Base URL of the Jadugar API
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Bearer token
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Version reported in `X-Client-Version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default)]
    pub logging: FileLoggingConfig,
}

/// Logging section of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileLoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FileConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: FileConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse config JSON")?;

        debug!("Loaded configuration file, base URL set: {}", config.base_url.is_some());
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. ~/.config/jadugar/jadugar.json
    /// 2. ./jadugar.json
    ///
    /// Returns `None` when neither file exists.
    pub fn load_default() -> Result<Option<Self>> {
        match Self::default_path() {
            Some(path) => Self::load(&path).map(Some),
            None => Ok(None),
        }
    }

    /// First existing configuration file in the default search order
    pub fn default_path() -> Option<PathBuf> {
        let home_path = dirs::home_dir()
            .map(|home| home.join(".config").join("jadugar").join("jadugar.json"));

        home_path
            .into_iter()
            .chain(std::iter::once(PathBuf::from("jadugar.json")))
            .find(|path| path.exists())
    }
}
