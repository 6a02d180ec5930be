//! Panel Visibility Store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::settings::UiSettingsRepository;

#[derive(Debug, Default)]
struct PanelState {
    visible: bool,
    /// Set by `request_open_after_switch`, consumed by `on_context_switch`.
    pending_open: bool,
}

/// Whether the assistant conversation panel is shown.
///
/// Persisted across restarts and independent of the Context Stack: scenes
/// mounting or unmounting never change it implicitly.
pub struct PanelVisibility {
    state: Mutex<PanelState>,
    settings: Arc<dyn UiSettingsRepository>,
    revision: watch::Sender<u64>,
}

impl PanelVisibility {
    pub fn new(settings: Arc<dyn UiSettingsRepository>) -> Self {
        let visible = match settings.load() {
            Ok(loaded) => loaded.panel_visible,
            Err(e) => {
                tracing::warn!("Failed to load panel visibility, using default: {}", e);
                false
            }
        };
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(PanelState {
                visible,
                pending_open: false,
            }),
            settings,
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persists `state.visible` and notifies subscribers. Called with the
    /// state lock held so the file always ends with the latest value.
    fn commit(&self, state: MutexGuard<'_, PanelState>) {
        let visible = state.visible;
        if let Err(e) = self
            .settings
            .update(&mut |settings| settings.panel_visible = visible)
        {
            tracing::warn!(visible, "Failed to persist panel visibility: {}", e);
        }
        drop(state);
        self.revision.send_modify(|rev| *rev += 1);
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn set_visible(&self, visible: bool) {
        let mut state = self.lock();
        if state.visible == visible {
            return;
        }
        state.visible = visible;
        tracing::debug!(visible, "Assistant panel visibility changed");
        self.commit(state);
    }

    /// Flips visibility and returns the new value.
    pub fn toggle(&self) -> bool {
        let mut state = self.lock();
        state.visible = !state.visible;
        let visible = state.visible;
        tracing::debug!(visible, "Assistant panel toggled");
        self.commit(state);
        visible
    }

    /// Asks for the panel to be open once the next context switch settles.
    pub fn request_open_after_switch(&self) {
        self.lock().pending_open = true;
    }

    pub fn has_pending_open(&self) -> bool {
        self.lock().pending_open
    }

    /// Closes the panel for a context switch, then reopens it if a request
    /// is pending, as one step under a single lock.
    ///
    /// Returns the resulting visibility.
    pub fn on_context_switch(&self) -> bool {
        let mut state = self.lock();
        let before = state.visible;
        state.visible = std::mem::take(&mut state.pending_open);
        let after = state.visible;
        tracing::debug!(reopened = after, "Context switch settled panel visibility");
        if before != after {
            self.commit(state);
        }
        after
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{InMemoryUiSettingsRepository, UiSettings};

    #[test]
    fn test_defaults_to_hidden() {
        let panel = PanelVisibility::new(Arc::new(InMemoryUiSettingsRepository::new()));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_restores_persisted_visibility() {
        let settings = Arc::new(InMemoryUiSettingsRepository::with_settings(UiSettings {
            panel_visible: true,
            ..UiSettings::default()
        }));
        let panel = PanelVisibility::new(settings);
        assert!(panel.is_visible());
    }

    #[test]
    fn test_set_and_toggle_persist() {
        let settings = Arc::new(InMemoryUiSettingsRepository::new());
        let panel = PanelVisibility::new(settings.clone());

        panel.set_visible(true);
        assert!(settings.load().unwrap().panel_visible);

        assert!(!panel.toggle());
        assert!(!settings.load().unwrap().panel_visible);
    }

    #[test]
    fn test_context_switch_closes_without_request() {
        let panel = PanelVisibility::new(Arc::new(InMemoryUiSettingsRepository::new()));
        panel.set_visible(true);
        assert!(!panel.on_context_switch());
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_context_switch_reopens_pending_request_once() {
        let panel = PanelVisibility::new(Arc::new(InMemoryUiSettingsRepository::new()));
        panel.set_visible(true);
        panel.request_open_after_switch();

        assert!(panel.on_context_switch());
        assert!(panel.is_visible());
        assert!(!panel.has_pending_open());

        // The request is consumed; the next switch closes.
        assert!(!panel.on_context_switch());
    }

    #[test]
    fn test_concurrent_toggles_persist_final_state() {
        let settings = Arc::new(InMemoryUiSettingsRepository::new());
        let panel = PanelVisibility::new(settings.clone());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        panel.toggle();
                    }
                });
            }
            scope.spawn(|| {
                for i in 0..50 {
                    panel.set_visible(i % 2 == 0);
                }
            });
        });

        assert_eq!(settings.load().unwrap().panel_visible, panel.is_visible());
    }

    #[test]
    fn test_unchanged_set_does_not_notify() {
        let panel = PanelVisibility::new(Arc::new(InMemoryUiSettingsRepository::new()));
        let rx = panel.subscribe();
        panel.set_visible(false);
        assert!(!rx.has_changed().unwrap());
        panel.set_visible(true);
        assert!(rx.has_changed().unwrap());
    }
}
