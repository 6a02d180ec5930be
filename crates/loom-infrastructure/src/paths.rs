//! Unified path management for loom files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/loom/              # Config directory (dirs::config_dir()/loom)
//! ├── config.toml              # User configuration
//! ├── ui_state.toml            # Persisted UI settings
//! └── logs/                    # Application logs
//! ```
//!
//! `LOOM_HOME` replaces the whole directory; tests pass an explicit base.

use loom_core::error::{LoomError, Result};
use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const LOOM_HOME_ENV: &str = "LOOM_HOME";

/// The files a loom service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    UiState,
}

impl ServiceType {
    fn relative(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::UiState => "ui_state.toml",
        }
    }
}

/// Resolves loom paths under a base directory.
#[derive(Debug, Clone, Default)]
pub struct LoomPaths {
    base: Option<PathBuf>,
}

impl LoomPaths {
    /// `base` overrides every other source when given.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the config directory: explicit base, then `LOOM_HOME`, then
    /// the platform config directory joined with `loom`.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        if let Some(home) = std::env::var_os(LOOM_HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        dirs::config_dir()
            .map(|dir| dir.join("loom"))
            .ok_or_else(|| LoomError::config("Cannot find config directory"))
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(service.relative()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_wins() {
        let paths = LoomPaths::new(Some(PathBuf::from("/tmp/loom-test")));
        assert_eq!(
            paths.get_path(ServiceType::Config).unwrap(),
            PathBuf::from("/tmp/loom-test/config.toml")
        );
        assert_eq!(
            paths.get_path(ServiceType::UiState).unwrap(),
            PathBuf::from("/tmp/loom-test/ui_state.toml")
        );
    }

    #[test]
    fn test_paths_share_config_dir() {
        let paths = LoomPaths::new(Some(PathBuf::from("/tmp/loom-test")));
        let dir = paths.config_dir().unwrap();
        for service in [ServiceType::Config, ServiceType::UiState] {
            assert!(paths.get_path(service).unwrap().starts_with(&dir));
        }
    }
}
