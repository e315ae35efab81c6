//! Agent types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DirectoryError;

/// Lifecycle status reported by the gateway. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Running,
    Completed,
    Error,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Idle,
        AgentStatus::Running,
        AgentStatus::Completed,
        AgentStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Running => "running",
            AgentStatus::Completed => "completed",
            AgentStatus::Error => "error",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = DirectoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "idle" => Ok(AgentStatus::Idle),
            "running" => Ok(AgentStatus::Running),
            "completed" => Ok(AgentStatus::Completed),
            "error" => Ok(AgentStatus::Error),
            other => Err(DirectoryError::validation(format!(
                "unknown agent status '{other}'"
            ))),
        }
    }
}

/// One agent as held by the directory.
///
/// Values are immutable once built; a refresh replaces the whole collection.
/// `name` is the reconciliation key and is unique within one fetched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    name: String,
    status: AgentStatus,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_active: Option<String>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        status: AgentStatus,
        description: impl Into<String>,
        last_active: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            description: description.into(),
            last_active,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `None` means the agent has never been active.
    pub fn last_active(&self) -> Option<&str> {
        self.last_active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_only_known_values() {
        for status in AgentStatus::ALL {
            assert_eq!(status.as_str().parse::<AgentStatus>().unwrap(), status);
        }
        let err = "paused".parse::<AgentStatus>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("paused"));
    }

    #[test]
    fn serializes_with_camel_case_last_active() {
        let agent = Agent::new(
            "researcher-1",
            AgentStatus::Running,
            "Finds things",
            Some("2024-01-01T00:00:00Z".to_string()),
        );
        let value = serde_json::to_value(&agent).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "researcher-1",
                "status": "running",
                "description": "Finds things",
                "lastActive": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn omits_last_active_when_never_active() {
        let agent = Agent::new("a", AgentStatus::Idle, "", None);
        let value = serde_json::to_value(&agent).unwrap();
        assert!(value.get("lastActive").is_none());
        assert!(value.get("last_active").is_none());
    }
}
