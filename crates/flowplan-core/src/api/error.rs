use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure raised by [`ApiClient`](super::ApiClient) for any non-success outcome.
///
/// Every variant renders a non-empty, human-readable message through
/// `Display`; callers show it as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error detail values echoed into messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Body fields consulted, in order, for a server-provided error message
const MESSAGE_FIELDS: [&str; 2] = ["detail", "message"];

impl ApiError {
    /// Truncate text to avoid surfacing excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build the error for a non-2xx response.
    ///
    /// The message comes from the body's `detail` or `message` field when the
    /// body is JSON and one of them is set; otherwise it is the status line,
    /// e.g. `500 Internal Server Error`.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = Self::message_from_body(body).unwrap_or_else(|| Self::status_line(status));
        ApiError::Status { status, message }
    }

    fn message_from_body(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        MESSAGE_FIELDS
            .iter()
            .find_map(|field| value.get(field).and_then(Self::describe))
    }

    /// Render a detail value, skipping the empty ones.
    /// Structured details (validation error lists) are kept as compact JSON.
    fn describe(value: &Value) -> Option<String> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) if items.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(Self::truncate_body(&other.to_string())),
        }
    }

    fn status_line(status: StatusCode) -> String {
        match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        }
    }

    /// Human-readable message, suitable for showing to the end user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code, when the failure came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(status.as_u16()),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidRequest(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// True when the server rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}
