//! Interfaces of the collaborators the orchestrator calls but does not own.
//!
//! - `remote`: entity creation, listing, messages and field patches
//! - `generation`: streamed content generation
//! - `navigation`: page routing plus the route paths used by handlers
//! - `auth`: signed-in state

pub mod auth;
pub mod generation;
pub mod navigation;
pub mod remote;

pub use auth::AuthProvider;
pub use generation::{ChunkStream, ContentGenerator, GenerationRequest};
pub use navigation::{Navigator, routes};
pub use remote::{ChatMessage, EntityKind, EntityRecord, MessageRole, RemoteDataLayer};
