//! Feature handlers, one per intent target.
//!
//! Each handler owns its slice of state and never calls another handler.

pub mod app_factory;
pub mod chat;
pub mod document;

pub use app_factory::{AppBuildStatus, AppFactoryHandler, AppFactorySlice};
pub use chat::{ChatHandler, ChatSlice};
pub use document::{DocumentHandler, DocumentSlice};
