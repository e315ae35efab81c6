//! # Directory Core
//!
//! Core types shared by every part of the Agent Directory.
//!
//! ## What lives here
//! - The immutable [`Agent`] model and its closed [`AgentStatus`] set
//! - [`FetchState`], the phase cell the list controller drives and the view reads
//! - The gateway wire shapes ([`RawAgentRecord`], [`TaskRequest`], [`TaskResponse`],
//!   [`AgentDraft`])
//! - [`DirectoryError`], the single error type crossing crate boundaries

pub mod agent;
pub mod error;
pub mod fetch_state;
pub mod wire;

pub use agent::{Agent, AgentStatus};
pub use error::{DirectoryError, Result};
pub use fetch_state::FetchState;
pub use wire::{AgentDraft, RawAgentRecord, RegisteredAgent, TaskRequest, TaskResponse};

/// Current Agent Directory version for compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information for logs and the gateway banner
pub const BUILD_INFO: &str = concat!(
    "Agent Directory ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Message shown to users whenever the agent list cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load agents. Please try again later.";

/// Gateway endpoints, relative to the origin
pub mod endpoints {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const API_V1_AGENTS: &str = "/api/v1/agents";
    pub const API_V1_AGENT: &str = "/api/v1/agents/{name}";
    pub const API_V1_AGENT_TASKS: &str = "/api/v1/agents/{name}/tasks";
    pub const API_V1_AGENT_RUN: &str = "/api/v1/agents/{name}/run";

    /// Base URL used when nothing else is configured
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
}
