use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `POST /projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}
