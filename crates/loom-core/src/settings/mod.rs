//! Persisted UI settings: model and repository interface.

pub mod model;
pub mod repository;

pub use model::UiSettings;
pub use repository::{InMemoryUiSettingsRepository, UiSettingsRepository};
