//! Agent List Controller
//!
//! Owns the [`FetchState`] cell for one directory consumer. The controller is
//! the only writer; views read it through [`AgentListController::subscribe`].
//!
//! Every activation takes a token. A result is committed only while the
//! token's epoch is still live (no deactivation in between) and, under
//! [`ResolutionPolicy::LatestActivation`], only if no newer activation has
//! started since.

use agent_transport::AgentTransport;
use directory_core::{FetchState, LOAD_FAILURE_MESSAGE};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, instrument};

/// How results from overlapping activations are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Only the most recent activation may settle the state.
    #[default]
    LatestActivation,
    /// Whichever fetch resolves last overwrites the state, no fencing.
    LastWriterWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivationToken {
    epoch: u64,
    generation: u64,
}

#[derive(Debug, Default)]
struct Lifecycle {
    /// Bumped by every deactivation.
    epoch: u64,
    /// Bumped by every activation.
    generation: u64,
    active: bool,
    in_flight: Vec<AbortHandle>,
}

pub struct AgentListController {
    transport: Arc<dyn AgentTransport>,
    state: watch::Sender<FetchState>,
    lifecycle: Mutex<Lifecycle>,
    resolution: ResolutionPolicy,
}

impl std::fmt::Debug for AgentListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lifecycle = self.lifecycle.lock();
        f.debug_struct("AgentListController")
            .field("phase", &self.state.borrow().phase())
            .field("resolution", &self.resolution)
            .field("active", &lifecycle.active)
            .field("generation", &lifecycle.generation)
            .field("in_flight", &lifecycle.in_flight.len())
            .finish()
    }
}

impl AgentListController {
    pub fn new(transport: Arc<dyn AgentTransport>) -> Self {
        Self::with_resolution(transport, ResolutionPolicy::default())
    }

    pub fn with_resolution(transport: Arc<dyn AgentTransport>, resolution: ResolutionPolicy) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            transport,
            state,
            lifecycle: Mutex::new(Lifecycle::default()),
            resolution,
        }
    }

    /// Observer handle; receivers see every committed transition's latest value.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn resolution(&self) -> ResolutionPolicy {
        self.resolution
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.lock().active
    }

    /// Enters `Loading`, fetches the list once and settles the state.
    ///
    /// Returns the state as it stands after this activation resolved, which is
    /// not necessarily this activation's own result if it was superseded.
    pub async fn activate(&self) -> FetchState {
        let token = self.begin();
        self.run(token).await
    }

    /// Runs an activation as a tokio task. Deactivation aborts it.
    pub fn spawn_activation(self: &Arc<Self>) -> JoinHandle<FetchState> {
        let token = self.begin();
        let controller = Arc::clone(self);
        let handle = tokio::spawn(async move { controller.run(token).await });

        let mut lifecycle = self.lifecycle.lock();
        lifecycle.in_flight.retain(|task| !task.is_finished());
        lifecycle.in_flight.push(handle.abort_handle());
        handle
    }

    /// Ends the consumer's lifetime: aborts spawned fetches, drops any result
    /// still in flight and resets the cell to `Idle`.
    pub fn deactivate(&self) {
        let mut lifecycle = self.lifecycle.lock();
        lifecycle.active = false;
        lifecycle.epoch += 1;
        for task in lifecycle.in_flight.drain(..) {
            task.abort();
        }
        self.state.send_replace(FetchState::Idle);
        info!("Agent list deactivated");
    }

    fn begin(&self) -> ActivationToken {
        let mut lifecycle = self.lifecycle.lock();
        lifecycle.active = true;
        lifecycle.generation += 1;
        self.state.send_replace(FetchState::Loading);
        ActivationToken {
            epoch: lifecycle.epoch,
            generation: lifecycle.generation,
        }
    }

    #[instrument(skip(self, token), fields(generation = token.generation))]
    async fn run(&self, token: ActivationToken) -> FetchState {
        info!("Loading agents");

        let next = match self.transport.list_agents().await {
            Ok(agents) => {
                info!("Loaded {} agents", agents.len());
                FetchState::success(agents)
            }
            Err(err) => {
                error!(error = %err.detail(), "Failed to fetch agents");
                FetchState::failure(LOAD_FAILURE_MESSAGE)
            }
        };

        self.commit(token, next);
        self.state()
    }

    fn commit(&self, token: ActivationToken, next: FetchState) -> bool {
        let lifecycle = self.lifecycle.lock();

        if !lifecycle.active || token.epoch != lifecycle.epoch {
            debug!("Discarding result delivered after deactivation");
            return false;
        }

        if self.resolution == ResolutionPolicy::LatestActivation
            && token.generation != lifecycle.generation
        {
            debug!(
                current = lifecycle.generation,
                "Discarding result from superseded activation"
            );
            return false;
        }

        self.state.send_replace(next);
        true
    }
}
