//! Request descriptors and decoded response bodies.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// HTTP methods the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Opaque bearer credential. Never empty.
///
/// `Debug` is redacted so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token string; an empty string is not a credential
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// How a request authenticates
#[derive(Debug, Clone, Default)]
pub enum Auth {
    #[default]
    Anonymous,
    Bearer(BearerToken),
}

/// One JSON-over-HTTP call against the backend.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    pub auth: Auth,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            auth: Auth::Anonymous,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Authenticate with a bearer token
    pub fn bearer(mut self, token: &BearerToken) -> Self {
        self.auth = Auth::Bearer(token.clone());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        if self.path.starts_with('/') {
            Ok(())
        } else {
            Err(ApiError::InvalidRequest(format!(
                "Path must start with '/': {}",
                self.path
            )))
        }
    }
}

/// Body of a successful response.
///
/// Successful responses without a JSON body are not errors; they decode to
/// `Empty` or `NotJson` and read as null through [`ResponseBody::into_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Empty,
    NotJson(String),
}

impl ResponseBody {
    pub fn parse(text: String) -> Self {
        if text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::NotJson(text),
        }
    }

    /// The decoded JSON, or `None` for an absent, null, or non-JSON body
    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(Value::Null) => None,
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Empty | ResponseBody::NotJson(_) => None,
        }
    }
}
