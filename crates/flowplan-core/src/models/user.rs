use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend record identifier. Accepts integer or string ids and
/// serializes back in the shape it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Str(s) => f.write_str(s),
        }
    }
}

/// Profile of the authenticated user, kept exactly as the server sent it.
///
/// The client only reads a few well-known fields; the object itself is
/// stored and restored untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    pub fn id(&self) -> Option<Id> {
        self.0
            .get("id")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Any field of the profile
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Name for display, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email())
            .unwrap_or("")
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for User {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Response of `/auth/login` and `/auth/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}
