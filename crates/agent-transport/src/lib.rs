//! # Agent Transport
//!
//! Talks to the agent gateway and turns its wire records into validated
//! [`Agent`](directory_core::Agent) values.
//!
//! Every operation performs exactly one request. Nothing is cached or retried
//! here; timeouts belong to the HTTP substrate and are only passed through
//! from [`ClientConfig`].

pub use directory_core;

mod client;
mod config;
pub mod normalize;

pub use client::HttpAgentClient;
pub use config::ClientConfig;
pub use normalize::{decode_collection, decode_record, normalize_collection, normalize_record};

use async_trait::async_trait;
use directory_core::{Agent, Result};
use serde_json::Value;

/// Read and write access to the gateway's agent resources.
///
/// The list controller only depends on this trait, so any source that can
/// produce normalized agents can drive it.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// `GET /agents`, in gateway order.
    async fn list_agents(&self) -> Result<Vec<Agent>>;

    /// `GET /agents/{name}`. Not-found is not distinguished from other failures.
    async fn get_agent(&self, name: &str) -> Result<Agent>;

    /// `POST /agents/{agent_name}/tasks` with `task` as the JSON body.
    /// At most one send per call.
    async fn create_task(&self, agent_name: &str, task: &Value) -> Result<Value>;
}
