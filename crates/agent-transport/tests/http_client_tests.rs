//! HTTP client tests against an in-process gateway stub

use agent_transport::directory_core::TaskRequest;
use agent_transport::{AgentTransport, ClientConfig, HttpAgentClient};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

#[derive(Clone, Default)]
struct StubState {
    hits: Arc<AtomicUsize>,
}

fn agents_fixture() -> Value {
    json!([
        {
            "name": "researcher-1",
            "status": "running",
            "description": "Autonomous research and document analysis agent",
            "last_active": "2024-01-01T00:00:00Z"
        },
        {
            "name": "Memory Agent",
            "status": "idle",
            "description": "Vector memory management and synchronization"
        }
    ])
}

async fn list_agents(State(state): State<StubState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(agents_fixture())
}

async fn get_agent(
    State(state): State<StubState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    agents_fixture()
        .as_array()
        .and_then(|agents| agents.iter().find(|a| a["name"] == name.as_str()).cloned())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_task(
    State(state): State<StubState>,
    Path(name): Path<String>,
    Json(task): Json<Value>,
) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"agent": name, "status": "accepted", "echo": task}))
}

async fn run_task(
    State(state): State<StubState>,
    Path(name): Path<String>,
    Json(task): Json<Value>,
) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "task_id": format!("task-{name}"),
        "status": "completed",
        "result": {"answer": task["prompt"], "parameters": task["parameters"]}
    }))
}

async fn always_fails(State(state): State<StubState>) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn healthy_gateway(state: StubState) -> Router {
    Router::new()
        .route("/api/v1/agents", get(list_agents))
        .route("/api/v1/agents/{name}", get(get_agent))
        .route("/api/v1/agents/{name}/tasks", post(create_task))
        .route("/api/v1/agents/{name}/run", post(run_task))
        .with_state(state)
}

fn failing_gateway(state: StubState) -> Router {
    Router::new()
        .route("/api/v1/agents", get(always_fails))
        .route("/api/v1/agents/{name}", get(always_fails))
        .route("/api/v1/agents/{name}/tasks", post(always_fails))
        .with_state(state)
}

async fn serve(router: Router) -> HttpAgentClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HttpAgentClient::new(ClientConfig::new(&format!("http://{addr}/api/v1")).unwrap()).unwrap()
}

#[tokio::test]
async fn test_list_agents_normalizes_records() {
    let client = serve(healthy_gateway(StubState::default())).await;

    let agents = assert_ok!(client.list_agents().await);

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name(), "researcher-1");
    assert_eq!(agents[0].last_active(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(agents[1].name(), "Memory Agent");
    assert_eq!(agents[1].last_active(), None);
}

#[tokio::test]
async fn test_list_agents_is_stable_for_unchanged_gateway() {
    let client = serve(healthy_gateway(StubState::default())).await;

    let first = assert_ok!(client.list_agents().await);
    let second = assert_ok!(client.list_agents().await);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_agent_encodes_name() {
    let client = serve(healthy_gateway(StubState::default())).await;

    let agent = assert_ok!(client.get_agent("Memory Agent").await);

    assert_eq!(agent.name(), "Memory Agent");
    assert_eq!(agent.description(), "Vector memory management and synchronization");
}

#[tokio::test]
async fn test_get_agent_not_found_is_transport_error() {
    let client = serve(healthy_gateway(StubState::default())).await;

    let err = assert_err!(client.get_agent("ghost").await);

    assert!(err.is_transport());
    assert_eq!(err.to_string(), "Failed to fetch agent");
}

#[tokio::test]
async fn test_create_task_sends_json_body_once() {
    let state = StubState::default();
    let client = serve(healthy_gateway(state.clone())).await;
    let task = json!({"prompt": "Research the latest developments in LLMs"});

    let receipt = assert_ok!(client.create_task("researcher-1", &task).await);

    assert_eq!(receipt["agent"], "researcher-1");
    assert_eq!(receipt["echo"], task);
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_errors_fail_every_operation() {
    let state = StubState::default();
    let client = serve(failing_gateway(state.clone())).await;

    let list = assert_err!(client.list_agents().await);
    let get = assert_err!(client.get_agent("researcher-1").await);
    let create = assert_err!(client.create_task("researcher-1", &json!({})).await);

    assert!(list.is_transport());
    assert!(get.is_transport());
    assert!(create.is_transport());
    assert_eq!(list.to_string(), "Failed to fetch agents");
    assert_eq!(create.to_string(), "Failed to create task");

    // one request per call, no retries
    assert_eq!(state.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpAgentClient::new(ClientConfig::new(&format!("http://{addr}/api/v1")).unwrap()).unwrap();

    let err = assert_err!(client.list_agents().await);
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_invalid_records_do_not_produce_partial_list() {
    let router = Router::new().route(
        "/api/v1/agents",
        get(|| async {
            Json(json!([
                {"name": "ok", "status": "idle", "description": ""},
                {"name": "bad", "status": "sleeping", "description": ""}
            ]))
        }),
    );
    let client = serve(router).await;

    let err = assert_err!(client.list_agents().await);
    assert!(err.is_validation());
    assert!(err.to_string().contains("sleeping"));
}

#[tokio::test]
async fn test_run_task_decodes_typed_response() {
    let state = StubState::default();
    let client = serve(healthy_gateway(state.clone())).await;
    let task = TaskRequest::new("Summarize vector stores").with_parameter("depth", json!(2));

    let response = assert_ok!(client.run_task("Memory Agent", &task).await);

    assert_eq!(response.task_id, "task-Memory Agent");
    assert_eq!(response.status, "completed");
    let result = response.result.expect("run result");
    assert_eq!(result["answer"], "Summarize vector stores");
    assert_eq!(result["parameters"]["depth"], 2);
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dot_and_empty_names_never_reach_gateway() {
    let state = StubState::default();
    let client = serve(healthy_gateway(state.clone())).await;

    for name in ["", ".", ".."] {
        let get = assert_err!(client.get_agent(name).await);
        let create = assert_err!(client.create_task(name, &json!({"prompt": "x"})).await);

        assert!(get.is_transport(), "get_agent({name:?}) was not a transport error");
        assert!(create.is_transport(), "create_task({name:?}) was not a transport error");
    }

    assert_eq!(state.hits.load(Ordering::SeqCst), 0);
}
