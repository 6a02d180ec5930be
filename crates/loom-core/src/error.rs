//! Error types for the Loom orchestration core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Loom crate.
///
/// Registration and resolution never produce errors (push/pop/resolve are
/// total); these variants cover persistence, configuration, collaborator
/// calls and refused presentation transitions.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LoomError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote data layer rejected or failed a call
    #[error("Remote call failed{}: {message}", status_suffix(.status))]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// A precondition requiring a signed-in user was not met
    #[error("Not signed in")]
    Unauthenticated,

    /// A presentation transition crosses the full-screen boundary but no
    /// navigation hook was supplied
    #[error("Switching from {from} to {to} requires a navigation hook")]
    BoundaryCrossing { from: String, to: String },
}

impl LoomError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Remote error
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a remote call failure
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check if this is a refused full-screen boundary crossing
    pub fn is_boundary_crossing(&self) -> bool {
        matches!(self, Self::BoundaryCrossing { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LoomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LoomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LoomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LoomError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// A type alias for `Result<T, LoomError>`.
pub type Result<T> = std::result::Result<T, LoomError>;
