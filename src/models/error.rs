//! Jadugar API error model
//!
//! Normalized representation of a single error entry reported by the API

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Status used when an error entry carries no usable status
pub const DEFAULT_STATUS: u16 = 500;

/// Code of errors synthesized when no response was received
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Code of errors synthesized when a success body could not be decoded
pub const DECODE_ERROR_CODE: &str = "DECODE_ERROR";

const PLATFORM_SPECIFIC_KEY: &str = "platform_specific";

/// Normalized API error
///
/// Built once from a JSON error object and never modified afterwards.
/// Absent fields stay `None`; they are never replaced by empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Value>,
    #[serde(skip)]
    handling_guide: Option<String>,
    #[serde(skip)]
    recovery_suggestion: Option<String>,
}

impl ErrorModel {
    /// Build an error model from one entry of an `errors` array
    ///
    /// Input that is not a JSON object yields a model with only the default status.
    pub fn from_value(value: &Value) -> Self {
        let meta = value
            .get("meta")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let (handling_guide, recovery_suggestion) = match meta
            .get(PLATFORM_SPECIFIC_KEY)
            .and_then(Value::as_object)
        {
            Some(platform_specific) => (
                string_field(platform_specific, "handling_guide"),
                string_field(platform_specific, "recovery_suggestion"),
            ),
            None => (None, None),
        };

        let empty = Map::new();
        let fields = value.as_object().unwrap_or(&empty);

        Self {
            id: string_field(fields, "id"),
            status: parse_status(fields.get("status")),
            code: string_field(fields, "code"),
            title: string_field(fields, "title"),
            detail: string_field(fields, "detail"),
            source: fields.get("source").cloned(),
            meta,
            links: fields.get("links").cloned(),
            handling_guide,
            recovery_suggestion,
        }
    }

    /// Extract the first error of an `{"errors": [...]}` document
    ///
    /// Returns `None` when the document has no `errors` key or the list is empty.
    pub fn from_error_document(document: &Value) -> Option<Self> {
        document
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .map(Self::from_value)
    }

    /// Error for a request that never received a response
    pub fn network(detail: impl Into<String>) -> Self {
        Self::synthesized(
            NETWORK_ERROR_CODE,
            "Network request failed",
            detail.into(),
        )
    }

    /// Error for a success response whose body could not be decoded
    pub fn decode(detail: impl Into<String>) -> Self {
        Self::synthesized(
            DECODE_ERROR_CODE,
            "Failed to decode response",
            detail.into(),
        )
    }

    fn synthesized(code: &str, title: &str, detail: String) -> Self {
        Self {
            id: None,
            status: DEFAULT_STATUS,
            code: Some(code.to_string()),
            title: Some(title.to_string()),
            detail: Some(detail),
            source: None,
            meta: Map::new(),
            links: None,
            handling_guide: None,
            recovery_suggestion: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Server-defined pointer to the part of the request that caused the error
    pub fn source(&self) -> Option<&Value> {
        self.source.as_ref()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn links(&self) -> Option<&Value> {
        self.links.as_ref()
    }

    /// Client-specific handling hint from `meta.platform_specific.handling_guide`
    pub fn handling_guide(&self) -> Option<&str> {
        self.handling_guide.as_deref()
    }

    /// Client-specific recovery hint from `meta.platform_specific.recovery_suggestion`
    pub fn recovery_suggestion(&self) -> Option<&str> {
        self.recovery_suggestion.as_deref()
    }

    /// Longer explanation of the failure, same as `detail`
    pub fn failure_reason(&self) -> Option<&str> {
        self.detail()
    }

    pub fn is_network_error(&self) -> bool {
        self.code() == Some(NETWORK_ERROR_CODE)
    }
}

impl fmt::Display for ErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title().unwrap_or_default())
    }
}

impl std::error::Error for ErrorModel {}

impl From<&Value> for ErrorModel {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Status may arrive as a JSON number or a numeric string.
/// Anything else falls back to the default.
fn parse_status(value: Option<&Value>) -> u16 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse::<u16>().ok(),
        _ => None,
    };
    parsed.unwrap_or(DEFAULT_STATUS)
}
