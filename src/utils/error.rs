//! Error handling module
//!
//! Defines the failure shapes returned by the API client

use crate::models::ErrorModel;
use thiserror::Error;

/// Client error types
///
/// A failed request yields either a normalized [`ErrorModel`] or the raw
/// HTTP error when the response could not be normalized.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error reported by the API, or a synthesized network/decode failure
    #[error("{0}")]
    Api(ErrorModel),

    /// Non-success response without a usable error document
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Client could not be constructed from its configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP-like status of the failure, if one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(model) => Some(model.status()),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Config(_) => None,
        }
    }

    /// Machine-readable code of a normalized error
    pub fn code(&self) -> Option<&str> {
        self.error_model().and_then(ErrorModel::code)
    }

    /// Normalized error model, if the failure was normalized
    pub fn error_model(&self) -> Option<&ErrorModel> {
        match self {
            ClientError::Api(model) => Some(model),
            _ => None,
        }
    }

    /// Consume the error and return the normalized model, if any
    pub fn into_error_model(self) -> Option<ErrorModel> {
        match self {
            ClientError::Api(model) => Some(model),
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.error_model()
            .map(ErrorModel::is_network_error)
            .unwrap_or(false)
    }

    /// Whether detailed error information should be logged
    ///
    /// Authentication failures are logged by status only.
    pub fn should_log_details(&self) -> bool {
        !matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<ErrorModel> for ClientError {
    fn from(model: ErrorModel) -> Self {
        ClientError::Api(model)
    }
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;
