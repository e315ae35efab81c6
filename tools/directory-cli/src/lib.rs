//! # Agent Directory CLI
//!
//! Command definitions and handlers behind the `agentdir` binary.

use agent_list::AgentListController;
use agent_transport::{AgentTransport, ClientConfig, HttpAgentClient};
use anyhow::Context;
use clap::{Parser, Subcommand};
use directory_core::{endpoints, FetchState, TaskRequest};
use directory_view::{render, AgentCard, TextRenderer};
use serde_json::Value;
use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "agentdir")]
#[command(about = "Agent Directory CLI - browse agents and hand them tasks")]
#[command(version = directory_core::VERSION)]
pub struct Cli {
    /// Gateway base URL, origin plus /api/v1
    #[arg(long, global = true, env = ClientConfig::BASE_URL_ENV, default_value = endpoints::DEFAULT_BASE_URL)]
    pub gateway: String,

    /// Request timeout in seconds, enforced by the HTTP client
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all agents
    List,
    /// Show one agent
    Show { name: String },
    /// Create a task for an agent
    Task {
        agent: String,
        /// Task prompt
        #[arg(long, required_unless_present = "json")]
        prompt: Option<String>,
        /// Task parameter as key=value; values parse as JSON when they can
        #[arg(long = "param", value_parser = parse_param, requires = "prompt")]
        params: Vec<(String, Value)>,
        /// Raw JSON task body, sent as-is
        #[arg(long, conflicts_with = "prompt")]
        json: Option<String>,
    },
    /// Run a task on an agent and print its outcome
    Run {
        agent: String,
        /// Task prompt
        #[arg(long)]
        prompt: String,
        /// Task parameter as key=value; values parse as JSON when they can
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, Value)>,
    },
    /// Refresh the directory on an interval until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = ClientConfig::new(&cli.gateway)?;
    if let Some(seconds) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(seconds));
    }
    let client = Arc::new(HttpAgentClient::new(config)?);
    let renderer = if cli.no_color {
        TextRenderer::plain()
    } else {
        TextRenderer::default()
    };

    match cli.command {
        Commands::List => handle_list(client, renderer).await,
        Commands::Show { name } => handle_show(client, renderer, &name).await,
        Commands::Task {
            agent,
            prompt,
            params,
            json,
        } => {
            let task = build_task(prompt, params, json)?;
            handle_task(client, &agent, &task).await
        }
        Commands::Run {
            agent,
            prompt,
            params,
        } => handle_run(client, &agent, task_request(prompt, params)).await,
        Commands::Watch { interval } => {
            handle_watch(client, renderer, Duration::from_secs(interval.max(1))).await
        }
    }
}

async fn handle_list(
    client: Arc<HttpAgentClient>,
    renderer: TextRenderer,
) -> anyhow::Result<ExitCode> {
    let controller = AgentListController::new(client);
    let state = controller.activate().await;
    print!("{}", renderer.render_page(&render(&state)));

    Ok(if state.error_message().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn handle_show(
    client: Arc<HttpAgentClient>,
    renderer: TextRenderer,
    name: &str,
) -> anyhow::Result<ExitCode> {
    let agent = client.get_agent(name).await.map_err(|err| {
        debug!(error = %err.detail(), "Agent lookup failed");
        err
    })?;
    print!("{}", renderer.render_card(&AgentCard::from_agent(&agent)));
    Ok(ExitCode::SUCCESS)
}

async fn handle_task(
    client: Arc<HttpAgentClient>,
    agent: &str,
    task: &Value,
) -> anyhow::Result<ExitCode> {
    let receipt = client.create_task(agent, task).await.map_err(|err| {
        debug!(error = %err.detail(), "Task creation failed");
        err
    })?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(ExitCode::SUCCESS)
}

async fn handle_run(
    client: Arc<HttpAgentClient>,
    agent: &str,
    task: TaskRequest,
) -> anyhow::Result<ExitCode> {
    let outcome = client.run_task(agent, &task).await.map_err(|err| {
        debug!(error = %err.detail(), "Task run failed");
        err
    })?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(ExitCode::SUCCESS)
}

async fn handle_watch(
    client: Arc<HttpAgentClient>,
    renderer: TextRenderer,
    interval: Duration,
) -> anyhow::Result<ExitCode> {
    let controller = Arc::new(AgentListController::new(client));
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Interrupted, stopping watch");
    };

    watch(controller, interval, shutdown, move |state| {
        print!("{}", renderer.render_page(&render(state)));
    })
    .await;
    Ok(ExitCode::SUCCESS)
}

/// Refreshes until `shutdown`, handing every published state to `on_change`.
///
/// `on_change` has stopped for good before the controller is deactivated, so
/// the final reset to `Idle` is never observed.
pub async fn watch<F, R>(
    controller: Arc<AgentListController>,
    interval: Duration,
    shutdown: F,
    mut on_change: R,
) where
    F: Future<Output = ()>,
    R: FnMut(&FetchState) + Send + 'static,
{
    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            on_change(&updates.borrow_and_update());
        }
    });

    refresh_until(&controller, interval, shutdown).await;

    printer.abort();
    let _ = printer.await;
    controller.deactivate();
}

/// Starts a refresh on every tick until `shutdown` resolves. A tick that
/// finds the previous refresh still loading is skipped, so a slow gateway
/// still settles instead of being superseded forever.
pub async fn refresh_until<F>(controller: &Arc<AgentListController>, interval: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if controller.state().is_loading() {
                    debug!("Previous refresh still in flight, skipping tick");
                    continue;
                }
                controller.spawn_activation();
            }
            _ = &mut shutdown => break,
        }
    }
}

fn task_request(prompt: String, params: Vec<(String, Value)>) -> TaskRequest {
    params
        .into_iter()
        .fold(TaskRequest::new(prompt), |task, (key, value)| {
            task.with_parameter(key, value)
        })
}

/// Body for `task`: the raw `--json` document, or `--prompt` plus params.
pub fn build_task(
    prompt: Option<String>,
    params: Vec<(String, Value)>,
    json: Option<String>,
) -> anyhow::Result<Value> {
    if let Some(raw) = json {
        return serde_json::from_str(&raw).context("--json is not valid JSON");
    }

    let prompt = prompt.context("either --prompt or --json is required")?;
    Ok(task_request(prompt, params).to_value()?)
}

pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
