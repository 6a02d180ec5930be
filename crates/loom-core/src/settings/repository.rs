//! UI settings repository trait.

use crate::error::Result;
use crate::settings::model::UiSettings;

/// Storage for [`UiSettings`].
///
/// Synchronous: the stores built on it apply their transitions atomically
/// and persist inline.
pub trait UiSettingsRepository: Send + Sync {
    /// Loads the settings, returning defaults when nothing was saved yet.
    fn load(&self) -> Result<UiSettings>;

    fn save(&self, settings: &UiSettings) -> Result<()>;

    /// Read-modify-write. Implementations backed by shared storage should
    /// override this to hold a lock across the whole update.
    fn update(&self, apply: &mut dyn FnMut(&mut UiSettings)) -> Result<()> {
        let mut settings = self.load()?;
        apply(&mut settings);
        self.save(&settings)
    }
}

/// Process-local settings storage. Nothing survives the process; sharing
/// one instance between stores simulates a restart in tests.
#[derive(Debug, Default)]
pub struct InMemoryUiSettingsRepository {
    settings: std::sync::Mutex<UiSettings>,
    fail_saves: std::sync::atomic::AtomicBool,
}

impl InMemoryUiSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: UiSettings) -> Self {
        Self {
            settings: std::sync::Mutex::new(settings),
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail, for exercising best-effort persistence.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

impl UiSettingsRepository for InMemoryUiSettingsRepository {
    fn load(&self) -> Result<UiSettings> {
        Ok(*self
            .settings
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    fn save(&self, settings: &UiSettings) -> Result<()> {
        if self.fail_saves.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(crate::error::LoomError::io("settings storage unavailable"));
        }
        *self
            .settings
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = *settings;
        Ok(())
    }
}
