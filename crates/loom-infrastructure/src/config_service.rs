//! Loads and saves `config.toml`.

use crate::paths::{LoomPaths, ServiceType};
use crate::storage::AtomicTomlFile;
use loom_core::config::LoomConfig;
use loom_core::error::Result;
use std::path::{Path, PathBuf};

/// Access to the user configuration file.
///
/// A missing file is not an error: [`ConfigService::load`] returns
/// defaults and [`ConfigService::ensure_config_file`] writes them out.
pub struct ConfigService {
    file: AtomicTomlFile<LoomConfig>,
}

impl ConfigService {
    pub fn new(paths: &LoomPaths) -> Result<Self> {
        Ok(Self {
            file: AtomicTomlFile::new(paths.get_path(ServiceType::Config)?),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn load(&self) -> Result<LoomConfig> {
        self.file.load_or_default()
    }

    pub fn save(&self, config: &LoomConfig) -> Result<()> {
        self.file.save(config)
    }

    /// Writes a default config if none exists and returns its path.
    pub fn ensure_config_file(&self) -> Result<PathBuf> {
        if self.file.load()?.is_none() {
            tracing::info!(path = %self.path().display(), "Creating default config");
            self.save(&LoomConfig::default())?;
        }
        Ok(self.path().to_path_buf())
    }
}
