//! Wire record normalization
//!
//! Gateway records are decoded one by one so a malformed element is reported
//! with its position. A collection is all-or-nothing: any bad record fails the
//! whole list.

use directory_core::{Agent, AgentStatus, DirectoryError, RawAgentRecord, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Renames `last_active` into the agent's last-activity field and validates
/// the rest. Description `null` or missing becomes empty.
pub fn normalize_record(raw: RawAgentRecord) -> Result<Agent> {
    if raw.name.is_empty() {
        return Err(DirectoryError::validation("agent name must not be empty"));
    }

    let status: AgentStatus = raw.status.parse().map_err(|_| {
        DirectoryError::validation(format!(
            "agent '{}' has unknown status '{}'",
            raw.name, raw.status
        ))
    })?;

    Ok(Agent::new(
        raw.name,
        status,
        raw.description.unwrap_or_default(),
        raw.last_active,
    ))
}

/// Normalizes in order and rejects duplicate names.
pub fn normalize_collection(records: Vec<RawAgentRecord>) -> Result<Vec<Agent>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut agents = Vec::with_capacity(records.len());

    for raw in records {
        let agent = normalize_record(raw)?;
        if !seen.insert(agent.name().to_string()) {
            return Err(DirectoryError::validation(format!(
                "duplicate agent name '{}'",
                agent.name()
            )));
        }
        agents.push(agent);
    }

    Ok(agents)
}

/// Decodes a `GET /agents` body.
pub fn decode_collection(body: Value) -> Result<Vec<Agent>> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(DirectoryError::validation(format!(
                "expected an array of agents, got {}",
                kind_of(&other)
            )))
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawAgentRecord>(item).map_err(|e| {
                DirectoryError::validation(format!("record {index} is malformed: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    normalize_collection(records)
}

/// Decodes a `GET /agents/{name}` body.
pub fn decode_record(body: Value) -> Result<Agent> {
    let raw = serde_json::from_value::<RawAgentRecord>(body)
        .map_err(|e| DirectoryError::validation(format!("record is malformed: {e}")))?;
    normalize_record(raw)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
