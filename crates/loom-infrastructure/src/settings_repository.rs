//! TOML-backed UI settings repository.

use crate::paths::{LoomPaths, ServiceType};
use crate::storage::AtomicTomlFile;
use loom_core::error::Result;
use loom_core::settings::{UiSettings, UiSettingsRepository};
use std::path::PathBuf;

/// Stores [`UiSettings`] in `ui_state.toml`.
///
/// Every update is a locked read-modify-write, so the panel and
/// presentation stores can share one file without clobbering each other.
pub struct TomlUiSettingsRepository {
    file: AtomicTomlFile<UiSettings>,
}

impl TomlUiSettingsRepository {
    /// Uses the centralized path management via `ServiceType::UiState`.
    pub fn new(paths: &LoomPaths) -> Result<Self> {
        Ok(Self::at(paths.get_path(ServiceType::UiState)?))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

impl UiSettingsRepository for TomlUiSettingsRepository {
    fn load(&self) -> Result<UiSettings> {
        self.file.load_or_default()
    }

    fn save(&self, settings: &UiSettings) -> Result<()> {
        self.file.save(settings)
    }

    fn update(&self, apply: &mut dyn FnMut(&mut UiSettings)) -> Result<()> {
        self.file.update(|settings| apply(settings)).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_core::panel::PanelVisibility;
    use loom_core::presentation::{OnCross, OpenConfig, PresentationMode, PresentationStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlUiSettingsRepository::new(&LoomPaths::new(Some(temp_dir.path().into()))).unwrap();
        assert_eq!(repo.load().unwrap(), UiSettings::default());
    }

    #[test]
    fn test_corrupted_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ui_state.toml");
        std::fs::write(&path, "presentation_mode = \"sideways\"").unwrap();
        let repo = TomlUiSettingsRepository::at(path);
        assert_eq!(repo.load().unwrap(), UiSettings::default());
    }

    #[test]
    fn test_stores_share_file_without_clobbering() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ui_state.toml");
        let repo: Arc<dyn UiSettingsRepository> = Arc::new(TomlUiSettingsRepository::at(path.clone()));

        let panel = PanelVisibility::new(repo.clone());
        let presentation = PresentationStore::new(repo.clone());
        panel.set_visible(true);
        presentation
            .switch_mode(PresentationMode::Overlay, OnCross::Forbid)
            .unwrap();

        let reloaded = TomlUiSettingsRepository::at(path).load().unwrap();
        assert!(reloaded.panel_visible);
        assert_eq!(reloaded.presentation_mode, PresentationMode::Overlay);
    }

    #[test]
    fn test_restart_restores_mode_but_not_open_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ui_state.toml");

        {
            let store = PresentationStore::new(Arc::new(TomlUiSettingsRepository::at(path.clone())));
            store.open(OpenConfig::default());
            store
                .switch_mode(PresentationMode::Overlay, OnCross::Forbid)
                .unwrap();
        }

        let restarted = PresentationStore::new(Arc::new(TomlUiSettingsRepository::at(path.clone())));
        assert_eq!(restarted.mode(), PresentationMode::Overlay);
        assert!(!restarted.is_open());

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(!raw.contains("open"));
    }
}
