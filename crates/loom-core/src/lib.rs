//! Domain layer of the Loom context and presentation orchestrator.
//!
//! - `scene`: scene descriptors, the Context Stack and scoped bindings
//! - `activator`: resolution of the assistant activator
//! - `panel`: the persisted panel visibility flag
//! - `presentation`: the document presentation state machine
//! - `intent`: intents and the feature handler interface
//! - `settings`: persisted UI settings and their repository
//! - `config`: the user configuration model
//! - `ports`: collaborator interfaces (remote data, generation, navigation, auth)

pub mod activator;
pub mod config;
pub mod error;
pub mod intent;
pub mod panel;
pub mod ports;
pub mod presentation;
pub mod scene;
pub mod settings;

// Re-export common error type
pub use error::LoomError;
