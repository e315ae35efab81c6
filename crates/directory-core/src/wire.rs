//! Gateway wire shapes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One agent exactly as the gateway sends it.
///
/// `status` stays a string here; it is checked against [`crate::AgentStatus`]
/// when the record is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAgentRecord {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
}

impl RawAgentRecord {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        description: impl Into<String>,
        last_active: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            description: Some(description.into()),
            last_active: last_active.map(str::to_string),
        }
    }
}

/// Body of `POST /agents/{name}/run`.
///
/// `POST /agents/{name}/tasks` takes any JSON object; a `TaskRequest` is one
/// valid choice there too, via [`TaskRequest::to_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl TaskRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            parameters: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// The transport sends untyped JSON; this is the conversion into it.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Outcome of `POST /agents/{name}/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub result: Option<Map<String, Value>>,
}

/// Body of `POST /agents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// What the gateway hands back after registering an [`AgentDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAgent {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capabilities: Vec<String>,
    pub status: String,
}
