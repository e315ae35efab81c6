//! # Directory View
//!
//! Turns a [`FetchState`](directory_core::FetchState) into something to show.
//! [`render`] is a pure projection into a [`DirectoryView`]; [`TextRenderer`]
//! writes that view for a terminal. Neither holds state or talks to the gateway.

mod text;
mod view;

pub use text::TextRenderer;
pub use view::{render, AgentCard, DirectoryView, StatusBadge, Tone};

pub const TITLE: &str = "AI Agent Framework";
pub const WELCOME: &str = "Welcome to AI Agent Framework";
pub const INTRO: &str =
    "A modular AI agent system focused on autonomous research, collaboration, and extensibility.";
pub const LOADING_LABEL: &str = "Loading agents...";
pub const EMPTY_LABEL: &str = "No agents registered.";
