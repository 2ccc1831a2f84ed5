//! HTTP client service
//!
//! Issues requests against the Jadugar API and normalizes error responses

use crate::config::ClientConfig;
use crate::models::ErrorModel;
use crate::utils::error::{ClientError, ClientResult};
use crate::utils::logging::redact_headers;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Platform label sent in `X-Client-Platform`
pub const PLATFORM: &str = "rust";

pub const CLIENT_PLATFORM_HEADER: &str = "x-client-platform";
pub const CLIENT_VERSION_HEADER: &str = "x-client-version";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request options passed through to the transport
///
/// Method defaults to `GET`. Headers set here replace the client defaults of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
enum RequestBody {
    Json(Value),
    Raw(Vec<u8>),
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header, replacing any earlier value for the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge a set of headers
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// JSON request body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Raw request body, sent as-is
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Jadugar API client
///
/// Holds only immutable configuration; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    version: String,
    version_header: HeaderValue,
    auth_header: Option<HeaderValue>,
}

impl ApiClient {
    /// Create a new client instance
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().user_agent(format!("jadugar/{}", crate::VERSION));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(ClientError::Http)?;
        Self::with_http_client(client, config)
    }

    /// Create a client on top of an existing reqwest client
    pub fn with_http_client(client: Client, config: ClientConfig) -> ClientResult<Self> {
        let version_header = HeaderValue::from_str(&config.version)
            .map_err(|e| ClientError::Config(format!("invalid client version: {}", e)))?;

        let auth_header = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
                value.set_sensitive(true);
                Some(value)
            }
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version,
            version_header,
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn platform(&self) -> &'static str {
        PLATFORM
    }

    pub fn has_api_key(&self) -> bool {
        self.auth_header.is_some()
    }

    /// Send a request and return the JSON body
    ///
    /// `endpoint` is appended verbatim to the base URL.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Value> {
        let response = self.execute(endpoint, options).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Api(ErrorModel::network(e.to_string())))?;

        // 204 and other empty success bodies carry no JSON
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            ClientError::Api(ErrorModel::decode(e.to_string()))
        })
    }

    /// Send a request and deserialize the JSON body into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let body = self.request(endpoint, options).await?;

        serde_json::from_value(body).map_err(|e| {
            warn!("Response body does not match expected type: {}", e);
            ClientError::Api(ErrorModel::decode(e.to_string()))
        })
    }

    pub async fn get(&self, endpoint: &str) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new()).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new().method(Method::POST).json(body))
            .await
    }

    pub async fn put(&self, endpoint: &str, body: Value) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new().method(Method::PUT).json(body))
            .await
    }

    pub async fn patch(&self, endpoint: &str, body: Value) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new().method(Method::PATCH).json(body))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new().method(Method::DELETE))
            .await
    }

    /// Send the request and split off failed responses
    async fn execute(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Response> {
        let (builder, request_id) = self.prepare(endpoint, options);

        let response = builder.send().await.map_err(|e| {
            error!("Jadugar request {} failed without response: {}", request_id, e);
            ClientError::Api(ErrorModel::network(e.to_string()))
        })?;

        let status = response.status();
        let status_error = response.error_for_status_ref().err();

        match status_error {
            None => {
                debug!("Jadugar request {} completed: {}", request_id, status);
                Ok(response)
            }
            Some(http_error) => {
                let error = normalize_error_response(response, http_error).await;
                if error.should_log_details() {
                    warn!("Jadugar request {} failed: {} - {}", request_id, status, error);
                } else {
                    warn!("Jadugar request {} rejected: {}", request_id, status);
                }
                Err(error)
            }
        }
    }

    /// Build the outgoing request with standard headers merged under caller headers
    fn prepare(&self, endpoint: &str, options: RequestOptions) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, endpoint);
        let request_id = Uuid::new_v4().to_string();

        let mut headers = self.default_headers();
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        debug!(
            request_id = %request_id,
            method = %options.method,
            url = %url,
            headers = %redact_headers(&headers),
            "Sending Jadugar API request"
        );

        let mut builder = self
            .client
            .request(options.method, url.as_str())
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .headers(headers);

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        builder = match options.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Raw(bytes)) => builder.body(bytes),
            None => builder,
        };

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        (builder, request_id)
    }

    /// Standard headers except `X-Request-ID`, which `prepare` sets per call
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CLIENT_PLATFORM_HEADER, HeaderValue::from_static(PLATFORM));
        headers.insert(CLIENT_VERSION_HEADER, self.version_header.clone());

        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }

        headers
    }
}

/// Map a non-success response to an error
///
/// Only a JSON body with a non-empty `errors` array is normalized; anything
/// else surfaces the raw HTTP error.
async fn normalize_error_response(response: Response, http_error: reqwest::Error) -> ClientError {
    if !is_json_response(&response) {
        return ClientError::Http(http_error);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Failed to read error response body: {}", e);
            return ClientError::Http(http_error);
        }
    };

    let document: Value = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(e) => {
            debug!("Error response body is not valid JSON: {}", e);
            return ClientError::Http(http_error);
        }
    };

    match ErrorModel::from_error_document(&document) {
        Some(model) => ClientError::Api(model),
        None => ClientError::Http(http_error),
    }
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}
