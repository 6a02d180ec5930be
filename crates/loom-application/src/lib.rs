//! Application layer for loom.
//!
//! Wires the orchestrator stores from `loom-core` to the adapters in
//! `loom-infrastructure`, and hosts the intent router with its feature
//! handlers.

pub mod fullscreen;
pub mod generation;
pub mod handlers;
pub mod router;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use fullscreen::FullscreenNavigation;
pub use router::{IntentRouter, IntentRouterBuilder};
pub use workspace::{Collaborators, Workspace};
