//! # Agent Gateway
//!
//! Development gateway for the Agent Directory. Serves the agent collection,
//! single-agent lookups, agent registration and task creation under
//! `/api/v1`, seeded with a fixed set of agents.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use directory_core::{
    endpoints, AgentDraft, RawAgentRecord, RegisteredAgent, TaskRequest, TaskResponse, VERSION,
};
use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const BIND_ADDR_ENV: &str = "AGENT_GATEWAY_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const CORS_ORIGIN_ENV: &str = "AGENT_GATEWAY_CORS_ORIGIN";
/// Frontend dev server
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

const IDLE: &str = "idle";

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, detail: &str) -> ApiError {
    (status, Json(json!({ "detail": detail })))
}

/// Agent records shared by every handler. Registration is the only writer.
#[derive(Clone, Debug)]
pub struct GatewayState {
    agents: Arc<RwLock<Vec<RawAgentRecord>>>,
}

impl GatewayState {
    pub fn new(agents: Vec<RawAgentRecord>) -> Self {
        Self {
            agents: Arc::new(RwLock::new(agents)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            RawAgentRecord::new(
                "Research Agent",
                "idle",
                "Autonomous research and document analysis agent",
                Some("2024-04-09 10:30 AM"),
            ),
            RawAgentRecord::new(
                "Memory Agent",
                "running",
                "Vector memory management and synchronization",
                Some("2024-04-09 11:45 AM"),
            ),
            RawAgentRecord::new(
                "Integration Agent",
                "completed",
                "Handles external service integrations",
                Some("2024-04-09 09:15 AM"),
            ),
        ])
    }

    pub fn agent_count(&self) -> usize {
        self.agents.read().len()
    }

    fn find(&self, name: &str) -> Option<RawAgentRecord> {
        self.agents
            .read()
            .iter()
            .find(|agent| agent.name == name)
            .cloned()
    }
}

/// Lets the frontend dev server call the API with credentials.
pub fn cors(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn app(state: GatewayState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(root))
        .route(endpoints::HEALTH, get(health_check))
        .route(
            endpoints::API_V1_AGENTS,
            get(list_agents).post(register_agent),
        )
        .route(endpoints::API_V1_AGENT, get(get_agent))
        .route(endpoints::API_V1_AGENT_TASKS, post(create_task))
        .route(endpoints::API_V1_AGENT_RUN, post(run_task))
        .layer(cors(cors_origin))
        .with_state(state)
}

#[instrument]
async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Agent Gateway is running",
        "version": VERSION
    }))
}

#[instrument]
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "agent-gateway",
        "version": VERSION
    }))
}

#[instrument(skip(state))]
async fn list_agents(State(state): State<GatewayState>) -> Json<Vec<RawAgentRecord>> {
    let agents = state.agents.read().clone();
    Json(agents)
}

#[instrument(skip(state))]
async fn get_agent(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
) -> Result<Json<RawAgentRecord>, ApiError> {
    state.find(&name).map(Json).ok_or_else(|| {
        warn!("Agent '{}' not found", name);
        api_error(StatusCode::NOT_FOUND, "Agent not found")
    })
}

/// New agents start idle and are listed from then on. Names must be
/// addressable as a single path segment and unique.
#[instrument(skip(state, draft))]
async fn register_agent(
    State(state): State<GatewayState>,
    Json(draft): Json<AgentDraft>,
) -> Result<Json<RegisteredAgent>, ApiError> {
    if matches!(draft.name.as_str(), "" | "." | "..") {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Agent name is not addressable",
        ));
    }

    let id = {
        let mut agents = state.agents.write();
        if agents.iter().any(|agent| agent.name == draft.name) {
            warn!("Agent '{}' already registered", draft.name);
            return Err(api_error(StatusCode::CONFLICT, "Agent already exists"));
        }
        let id = format!(
            "{}-{}",
            draft.name.to_lowercase().replace(' ', "-"),
            agents.len() + 1
        );
        agents.push(RawAgentRecord {
            name: draft.name.clone(),
            status: IDLE.to_string(),
            description: draft.description.clone(),
            last_active: None,
        });
        id
    };
    info!(%id, "Agent '{}' registered", draft.name);

    Ok(Json(RegisteredAgent {
        id,
        name: draft.name,
        description: draft.description,
        capabilities: draft.capabilities,
        status: IDLE.to_string(),
    }))
}

/// Accepts any JSON body and hands back a receipt; nothing is executed.
#[instrument(skip(task))]
async fn create_task(Path(name): Path<String>, Json(task): Json<Value>) -> Json<Value> {
    let task_id = Uuid::new_v4();
    info!(%task_id, fields = task.as_object().map(|t| t.len()).unwrap_or(0), "Task accepted");

    Json(json!({
        "task_id": task_id,
        "agent": name,
        "status": "accepted",
        "created_at": chrono::Utc::now().to_rfc3339()
    }))
}

/// Completes immediately with a canned result for known agents.
#[instrument(skip(state, task))]
async fn run_task(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
    Json(task): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Some(agent) = state.find(&name) else {
        warn!("Agent '{}' not found", name);
        return Err(api_error(StatusCode::NOT_FOUND, "Agent not found"));
    };

    let mut result = Map::new();
    result.insert(
        "answer".to_string(),
        json!(format!(
            "Stub response from {} for prompt: {}",
            agent.name, task.prompt
        )),
    );
    result.insert(
        "sources".to_string(),
        json!(["https://example.com/1", "https://example.com/2"]),
    );
    result.insert("confidence".to_string(), json!(0.85));

    let response = TaskResponse {
        task_id: format!("task-{}", Uuid::new_v4().simple()),
        status: "completed".to_string(),
        result: Some(result),
    };
    info!(task_id = %response.task_id, "Task completed");
    Ok(Json(response))
}
