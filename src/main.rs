//! Jadugar API command line client
//!
//! Sends a single request to the Jadugar API and prints the JSON response

use anyhow::{Context, Result};
use clap::Parser;
use jadugar::utils::logging::init_logging;
use jadugar::{ApiClient, ClientError, RequestOptions, Settings};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// jadugar - Jadugar API client
///
/// Configuration is read from ~/.config/jadugar/jadugar.json or ./jadugar.json,
/// then overridden by JADUGAR_BASE_URL, JADUGAR_API_KEY, JADUGAR_CLIENT_VERSION
/// and JADUGAR_TIMEOUT.
///
/// Examples:
///   jadugar /widgets
///   jadugar -X POST -d '{"name":"sprocket"}' /widgets
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Endpoint path appended to the base URL
    #[arg(value_name = "ENDPOINT")]
    endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    method: String,

    /// Extra header in "Name: value" form, overrides defaults
    #[arg(long = "header", short = 'H', value_name = "HEADER", value_parser = parse_header)]
    headers: Vec<(HeaderName, HeaderValue)>,

    /// Query parameter in "key=value" form
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE", value_parser = parse_query)]
    query: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, short = 'd', value_name = "JSON")]
    data: Option<String>,

    /// Configuration file (overrides the default search)
    #[arg(long, env = "JADUGAR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// API base URL (overrides configuration)
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", raw))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| e.to_string())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|e| e.to_string())?;
    Ok((name, value))
}

fn parse_query(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected 'key=value', got '{}'", raw))
}

fn build_options(cli: &Cli) -> Result<RequestOptions> {
    let method = Method::from_bytes(cli.method.to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method: {}", cli.method))?;

    let mut options = RequestOptions::new().method(method);

    for (name, value) in &cli.headers {
        options = options.header(name.clone(), value.clone());
    }

    for (key, value) in &cli.query {
        options = options.query(key.clone(), value.clone());
    }

    if let Some(data) = &cli.data {
        let body: serde_json::Value =
            serde_json::from_str(data).context("Request body must be valid JSON")?;
        options = options.json(body);
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref(), cli.base_url.clone())
        .context("Failed to load client settings")?;

    init_logging(&settings.logging)?;
    info!("{}", jadugar::version_info());

    let options = build_options(&cli)?;
    let client = ApiClient::new(settings.client).context("Failed to create API client")?;

    match client.request(&cli.endpoint, options).await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(ClientError::Api(model)) => {
            eprintln!(
                "Error: {}: {}",
                model.title().unwrap_or("Request failed"),
                model.detail().unwrap_or("no details")
            );
            if let Some(guide) = model.handling_guide() {
                eprintln!("Handling Guide: {}", guide);
            }
            if let Some(suggestion) = model.recovery_suggestion() {
                eprintln!("Recovery Suggestion: {}", suggestion);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
