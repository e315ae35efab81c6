use directory_core::{endpoints, DirectoryError, Result};
use reqwest::Url;
use std::time::Duration;

/// Where the gateway lives and how the HTTP substrate should behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin plus `/api/v1`.
    pub base_url: Url,
    /// Handed to reqwest as-is. `None` leaves the substrate default.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub const BASE_URL_ENV: &'static str = "AGENT_GATEWAY_URL";

    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DirectoryError::configuration(format!("gateway URL '{base_url}' is invalid: {e}"))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(DirectoryError::configuration(format!(
                "gateway URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            request_timeout: None,
        })
    }

    /// Reads `AGENT_GATEWAY_URL`, falling back to the local development gateway.
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(endpoints::DEFAULT_BASE_URL),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
