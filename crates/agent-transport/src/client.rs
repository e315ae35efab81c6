//! reqwest-backed gateway client

use async_trait::async_trait;
use directory_core::{Agent, DirectoryError, Result, TaskRequest, TaskResponse};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::normalize::{decode_collection, decode_record};
use crate::AgentTransport;

const LIST_AGENTS: &str = "fetch agents";
const GET_AGENT: &str = "fetch agent";
const CREATE_TASK: &str = "create task";
const RUN_TASK: &str = "run task";

/// Gateway client over HTTP. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: Client,
    base_url: Url,
}

impl HttpAgentClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DirectoryError::configuration(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `url` collapses `.` and `..` and an empty segment changes the route, so
    /// none of them can name an agent on the wire.
    fn agent_segment<'a>(name: &'a str, operation: &'static str) -> Result<&'a str> {
        match name {
            "" | "." | ".." => Err(DirectoryError::transport(
                operation,
                format!("agent name '{name}' cannot be used as a path segment"),
            )),
            _ => Ok(name),
        }
    }

    /// `POST /agents/{name}/run`: runs a task and waits for its outcome.
    #[instrument(skip(self, task))]
    pub async fn run_task(&self, agent_name: &str, task: &TaskRequest) -> Result<TaskResponse> {
        let segment = Self::agent_segment(agent_name, RUN_TASK)?;
        let response = self
            .client
            .post(self.endpoint(&["agents", segment, "run"]))
            .json(task)
            .send()
            .await
            .map_err(|e| DirectoryError::transport(RUN_TASK, e.to_string()))?;

        let body = Self::read_json(response, RUN_TASK).await?;
        serde_json::from_value(body).map_err(|e| {
            DirectoryError::validation(format!("{RUN_TASK}: unexpected response shape: {e}"))
        })
    }

    async fn read_json(response: Response, operation: &'static str) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::transport(
                operation,
                format!("gateway returned {status}"),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            DirectoryError::validation(format!("{operation}: response body is not JSON: {e}"))
        })
    }
}

#[async_trait]
impl AgentTransport for HttpAgentClient {
    #[instrument(skip(self))]
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        let response = self
            .client
            .get(self.endpoint(&["agents"]))
            .send()
            .await
            .map_err(|e| DirectoryError::transport(LIST_AGENTS, e.to_string()))?;

        let agents = decode_collection(Self::read_json(response, LIST_AGENTS).await?)?;
        debug!("Fetched {} agents", agents.len());
        Ok(agents)
    }

    #[instrument(skip(self))]
    async fn get_agent(&self, name: &str) -> Result<Agent> {
        let segment = Self::agent_segment(name, GET_AGENT)?;
        let response = self
            .client
            .get(self.endpoint(&["agents", segment]))
            .send()
            .await
            .map_err(|e| DirectoryError::transport(GET_AGENT, e.to_string()))?;

        decode_record(Self::read_json(response, GET_AGENT).await?)
    }

    #[instrument(skip(self, task))]
    async fn create_task(&self, agent_name: &str, task: &Value) -> Result<Value> {
        let segment = Self::agent_segment(agent_name, CREATE_TASK)?;
        let response = self
            .client
            .post(self.endpoint(&["agents", segment, "tasks"]))
            .json(task)
            .send()
            .await
            .map_err(|e| DirectoryError::transport(CREATE_TASK, e.to_string()))?;

        let receipt = Self::read_json(response, CREATE_TASK).await?;
        debug!("Task accepted for agent '{}'", agent_name);
        Ok(receipt)
    }
}
