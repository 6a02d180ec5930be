//! Infrastructure adapters for loom: file storage, configuration, HTTP
//! remote data layer, navigation history and config-backed auth.

pub mod auth;
pub mod config_service;
pub mod http_remote;
pub mod navigator;
pub mod paths;
pub mod settings_repository;
pub mod storage;

pub use crate::auth::ConfigAuthProvider;
pub use crate::config_service::ConfigService;
pub use crate::http_remote::HttpRemoteDataLayer;
pub use crate::navigator::HistoryNavigator;
pub use crate::paths::{LoomPaths, ServiceType};
pub use crate::settings_repository::TomlUiSettingsRepository;
