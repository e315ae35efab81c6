pub use agent_transport;
pub use directory_core;

mod controller;

pub use controller::{AgentListController, ResolutionPolicy};

// Re-export core types for convenience
pub use directory_core::{Agent, FetchState, LOAD_FAILURE_MESSAGE};
