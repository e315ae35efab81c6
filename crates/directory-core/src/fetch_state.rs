//! Phase of a list fetch

use std::sync::Arc;

use crate::agent::Agent;

/// Exactly one phase is active at a time.
///
/// `Success` holds the whole collection behind an `Arc` so observers can take
/// snapshots without copying every agent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Arc<Vec<Agent>>),
    Failure(String),
}

impl FetchState {
    pub fn success(agents: Vec<Agent>) -> Self {
        FetchState::Success(Arc::new(agents))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        FetchState::Failure(message.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Settled means the current activation produced a result.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Failure(_))
    }

    pub fn agents(&self) -> Option<&[Agent]> {
        match self {
            FetchState::Success(agents) => Some(agents.as_slice()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Failure(_) => "failure",
        }
    }
}
