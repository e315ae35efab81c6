//! Error types for the Agent Directory

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The gateway answered with a non-success status or could not be reached.
    ///
    /// Display only names the operation. `detail` is kept for diagnostics and
    /// carries no stable reason code.
    #[error("Failed to {operation}")]
    Transport {
        operation: &'static str,
        detail: String,
    },

    #[error("Invalid agent record: {reason}")]
    Validation { reason: String },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl DirectoryError {
    pub fn transport(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            detail: detail.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Diagnostic text for logs, never for users.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport { operation, detail } => format!("{operation}: {detail}"),
            other => other.to_string(),
        }
    }
}
