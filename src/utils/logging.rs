//! Logging utilities
//!
//! Subscriber setup and helpers for logging outgoing requests

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;

/// Longest header value written to debug logs
const MAX_HEADER_LOG_LEN: usize = 100;

/// Initialize the global tracing subscriber
///
/// Logs go to stderr so stdout carries only response bodies.
/// `json` format is meant for production; anything else logs human readable text.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    tracing::subscriber::set_global_default(build_subscriber(config, std::io::stderr))
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}

fn build_subscriber<W>(
    config: &LoggingConfig,
    writer: W,
) -> Box<dyn tracing::Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    if config.format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_writer(writer)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_writer(writer)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    }
}

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}... ({} chars truncated)", &s[..cut], s.chars().count() - max_len),
        None => s.to_string(),
    }
}

/// Loggable view of request headers with credentials hidden
pub fn redact_headers(headers: &HeaderMap) -> serde_json::Value {
    let entries = headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION || value.is_sensitive() {
                "[redacted]".to_string()
            } else {
                match value.to_str() {
                    Ok(text) => truncate_content(text, MAX_HEADER_LOG_LEN),
                    Err(_) => "[binary]".to_string(),
                }
            };
            (name.as_str().to_string(), serde_json::Value::String(shown))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(entries)
}
