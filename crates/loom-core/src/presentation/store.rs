//! Presentation Mode Store: open/close and the three-mode state machine.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tokio::sync::watch;

use super::model::{
    BoundaryCrossing, DocumentDraft, FullscreenAccess, ModeTransition, OnCross, OpenConfig,
    PresentationMode, PresentationState,
};
use crate::error::{LoomError, Result};
use crate::settings::UiSettingsRepository;

/// Tracks whether a document is open, how it is presented, and its draft.
///
/// States are `closed` and `open(mode)`. Only `mode` is persisted; a new
/// store always starts closed with an empty draft.
///
/// Transitions between embedded and overlay happen in place. Entering or
/// leaving full screen while open changes location, so the caller must pass
/// a navigation hook ([`OnCross::Call`]); the store records and persists the
/// new mode, then calls the hook. It never navigates itself.
pub struct PresentationStore {
    state: RwLock<PresentationState>,
    settings: Arc<dyn UiSettingsRepository>,
    revision: watch::Sender<u64>,
}

impl PresentationStore {
    /// Creates a closed store, restoring the last persisted mode.
    pub fn new(settings: Arc<dyn UiSettingsRepository>) -> Self {
        let mode = match settings.load() {
            Ok(loaded) => loaded.presentation_mode,
            Err(e) => {
                tracing::warn!("Failed to load presentation mode, using default: {}", e);
                PresentationMode::default()
            }
        };
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(PresentationState {
                mode,
                ..PresentationState::default()
            }),
            settings,
            revision,
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, PresentationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn persist_mode(&self, mode: PresentationMode) {
        if let Err(e) = self
            .settings
            .update(&mut |settings| settings.presentation_mode = mode)
        {
            tracing::warn!(%mode, "Failed to persist presentation mode: {}", e);
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    pub fn mode(&self) -> PresentationMode {
        self.state().mode
    }

    pub fn draft(&self) -> DocumentDraft {
        self.state().draft
    }

    /// Opens a document, replacing any previous draft.
    pub fn open(&self, config: OpenConfig) -> PresentationState {
        let (snapshot, forced) = {
            let mut state = self.write();
            let forced = config.mode.filter(|mode| *mode != state.mode);
            if let Some(mode) = config.mode {
                state.mode = mode;
            }
            state.is_open = true;
            state.draft = config.draft.unwrap_or_default();
            state.document_id = config.document_id;
            (state.clone(), forced)
        };
        if let Some(mode) = forced {
            self.persist_mode(mode);
        }
        tracing::info!(mode = %snapshot.mode, document_id = ?snapshot.document_id, "Document opened");
        self.bump();
        snapshot
    }

    /// Closes the document and resets the draft. No-op when closed.
    pub fn close(&self) {
        {
            let mut state = self.write();
            if !state.is_open {
                return;
            }
            state.is_open = false;
            state.draft = DocumentDraft::default();
            state.document_id = None;
        }
        tracing::info!("Document closed");
        self.bump();
    }

    /// Moves to `new_mode`.
    ///
    /// While closed only the preference changes and no hook is called.
    /// While open, a transition across the full-screen boundary with
    /// [`OnCross::Forbid`] fails with [`LoomError::BoundaryCrossing`] and
    /// leaves the store untouched.
    pub fn switch_mode(
        &self,
        new_mode: PresentationMode,
        on_cross: OnCross<'_>,
    ) -> Result<ModeTransition> {
        let (from, crossing) = {
            let mut state = self.write();
            let from = state.mode;
            if from == new_mode {
                return Ok(ModeTransition::Unchanged(from));
            }
            let crossing = (state.is_open && from.crosses_boundary(new_mode)).then(|| {
                BoundaryCrossing {
                    from,
                    to: new_mode,
                    document_id: state.document_id.clone(),
                }
            });
            if crossing.is_some() && matches!(on_cross, OnCross::Forbid) {
                return Err(LoomError::BoundaryCrossing {
                    from: from.to_string(),
                    to: new_mode.to_string(),
                });
            }
            state.mode = new_mode;
            (from, crossing)
        };

        self.persist_mode(new_mode);
        self.bump();

        match crossing {
            Some(crossing) => {
                tracing::info!(from = %crossing.from, to = %crossing.to, "Presentation crossing full-screen boundary");
                if let OnCross::Call(hook) = on_cross {
                    hook(crossing.clone());
                }
                Ok(ModeTransition::Crossed(crossing))
            }
            None => {
                tracing::debug!(%from, to = %new_mode, "Presentation mode switched in place");
                Ok(ModeTransition::InPlace { from, to: new_mode })
            }
        }
    }

    /// Cycles embedded, overlay, fullscreen, embedded under the same
    /// boundary rule as [`PresentationStore::switch_mode`].
    pub fn toggle_mode(&self, on_cross: OnCross<'_>) -> Result<ModeTransition> {
        let next = self.mode().next();
        self.switch_mode(next, on_cross)
    }

    /// Edits the draft of the open document. Returns false when closed.
    pub fn update_draft(&self, edit: impl FnOnce(&mut DocumentDraft)) -> bool {
        {
            let mut state = self.write();
            if !state.is_open {
                return false;
            }
            edit(&mut state.draft);
        }
        self.bump();
        true
    }

    /// Edits the draft only if `document_id` is still the open document.
    /// The check and the edit happen under one lock, so a concurrent `open`
    /// of another document never receives the edit.
    pub fn update_draft_for(
        &self,
        document_id: &str,
        edit: impl FnOnce(&mut DocumentDraft),
    ) -> bool {
        {
            let mut state = self.write();
            if !state.is_open || state.document_id.as_deref() != Some(document_id) {
                return false;
            }
            edit(&mut state.draft);
        }
        self.bump();
        true
    }

    /// Records the remote id of the open document. Returns false when closed.
    pub fn set_document_id(&self, id: impl Into<String>) -> bool {
        {
            let mut state = self.write();
            if !state.is_open {
                return false;
            }
            state.document_id = Some(id.into());
        }
        self.bump();
        true
    }

    /// Decides whether the full-screen location may render.
    pub fn fullscreen_access(&self) -> FullscreenAccess {
        let state = self.state();
        if state.is_open {
            FullscreenAccess::Granted {
                document_id: state.document_id,
                draft: state.draft,
            }
        } else {
            FullscreenAccess::Redirect
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::BoundaryDirection;
    use crate::settings::{InMemoryUiSettingsRepository, UiSettings};

    fn store() -> (PresentationStore, Arc<InMemoryUiSettingsRepository>) {
        let settings = Arc::new(InMemoryUiSettingsRepository::new());
        (PresentationStore::new(settings.clone()), settings)
    }

    #[test]
    fn test_starts_closed_with_default_mode() {
        let (store, _) = store();
        let state = store.state();
        assert!(!state.is_open);
        assert_eq!(state.mode, PresentationMode::Embedded);
        assert_eq!(state.draft, DocumentDraft::default());
    }

    #[test]
    fn test_open_uses_persisted_mode() {
        let settings = Arc::new(InMemoryUiSettingsRepository::with_settings(UiSettings {
            panel_visible: false,
            presentation_mode: PresentationMode::Overlay,
        }));
        let store = PresentationStore::new(settings);
        let state = store.open(OpenConfig::default());
        assert!(state.is_open);
        assert_eq!(state.mode, PresentationMode::Overlay);
    }

    #[test]
    fn test_open_with_forced_mode_and_draft() {
        let (store, settings) = store();
        let state = store.open(
            OpenConfig::default()
                .with_mode(PresentationMode::Overlay)
                .with_draft(DocumentDraft::titled("Q3 plan"))
                .with_document_id("doc-1"),
        );
        assert_eq!(state.mode, PresentationMode::Overlay);
        assert_eq!(state.draft.title, "Q3 plan");
        assert_eq!(state.document_id.as_deref(), Some("doc-1"));
        assert_eq!(
            settings.load().unwrap().presentation_mode,
            PresentationMode::Overlay
        );
    }

    #[test]
    fn test_close_resets_draft() {
        let (store, _) = store();
        store.open(OpenConfig::default().with_draft(DocumentDraft::titled("x")));
        store.close();
        let state = store.state();
        assert!(!state.is_open);
        assert_eq!(state.draft, DocumentDraft::default());
        assert!(state.document_id.is_none());
    }

    #[test]
    fn test_reopen_replaces_draft() {
        let (store, _) = store();
        store.open(OpenConfig::default().with_draft(DocumentDraft::titled("first")));
        let state = store.open(OpenConfig::default());
        assert_eq!(state.draft, DocumentDraft::default());
    }

    #[test]
    fn test_same_family_switch_is_in_place() {
        let (store, _) = store();
        store.open(OpenConfig::default());
        let transition = store
            .switch_mode(PresentationMode::Overlay, OnCross::Forbid)
            .unwrap();
        assert_eq!(
            transition,
            ModeTransition::InPlace {
                from: PresentationMode::Embedded,
                to: PresentationMode::Overlay
            }
        );
    }

    #[test]
    fn test_switch_to_fullscreen_calls_hook_once_and_persists() {
        let (store, settings) = store();
        store.open(OpenConfig::default().with_document_id("doc-7"));

        let mut calls = Vec::new();
        let transition = store
            .switch_mode(
                PresentationMode::Fullscreen,
                OnCross::Call(&mut |crossing| calls.push(crossing)),
            )
            .unwrap();

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].direction(), BoundaryDirection::EnterFullscreen);
        assert_eq!(calls[0].document_id.as_deref(), Some("doc-7"));
        assert!(matches!(transition, ModeTransition::Crossed(_)));
        assert_eq!(
            settings.load().unwrap().presentation_mode,
            PresentationMode::Fullscreen
        );
    }

    #[test]
    fn test_crossing_without_hook_is_refused() {
        let (store, settings) = store();
        store.open(OpenConfig::default());
        let err = store
            .switch_mode(PresentationMode::Fullscreen, OnCross::Forbid)
            .unwrap_err();
        assert!(err.is_boundary_crossing());
        assert_eq!(store.mode(), PresentationMode::Embedded);
        assert_eq!(
            settings.load().unwrap().presentation_mode,
            PresentationMode::Embedded
        );
    }

    #[test]
    fn test_leaving_fullscreen_calls_hook() {
        let (store, _) = store();
        store.open(OpenConfig::default().with_mode(PresentationMode::Fullscreen));
        let mut directions = Vec::new();
        store
            .switch_mode(
                PresentationMode::Overlay,
                OnCross::Call(&mut |c| directions.push(c.direction())),
            )
            .unwrap();
        assert_eq!(directions, vec![BoundaryDirection::LeaveFullscreen]);
    }

    #[test]
    fn test_switch_while_closed_only_records_preference() {
        let (store, settings) = store();
        let mut called = false;
        let transition = store
            .switch_mode(
                PresentationMode::Fullscreen,
                OnCross::Call(&mut |_| called = true),
            )
            .unwrap();
        assert!(!called);
        assert!(matches!(transition, ModeTransition::InPlace { .. }));
        assert_eq!(
            settings.load().unwrap().presentation_mode,
            PresentationMode::Fullscreen
        );
    }

    #[test]
    fn test_switch_to_current_mode_is_unchanged() {
        let (store, _) = store();
        store.open(OpenConfig::default());
        let transition = store
            .switch_mode(PresentationMode::Embedded, OnCross::Forbid)
            .unwrap();
        assert_eq!(transition, ModeTransition::Unchanged(PresentationMode::Embedded));
    }

    #[test]
    fn test_toggle_cycles_with_boundary_rule() {
        let (store, _) = store();
        store.open(OpenConfig::default());
        let mut crossings = 0;
        let mut hook = |_: BoundaryCrossing| crossings += 1;

        assert_eq!(
            store.toggle_mode(OnCross::Call(&mut hook)).unwrap().mode(),
            PresentationMode::Overlay
        );
        assert_eq!(
            store.toggle_mode(OnCross::Call(&mut hook)).unwrap().mode(),
            PresentationMode::Fullscreen
        );
        assert_eq!(
            store.toggle_mode(OnCross::Call(&mut hook)).unwrap().mode(),
            PresentationMode::Embedded
        );
        assert_eq!(crossings, 2);
    }

    #[test]
    fn test_mode_survives_restart_but_open_flag_does_not() {
        let settings = Arc::new(InMemoryUiSettingsRepository::new());
        let store = PresentationStore::new(settings.clone());
        store.open(OpenConfig::default());
        store
            .switch_mode(PresentationMode::Overlay, OnCross::Forbid)
            .unwrap();
        drop(store);

        let restarted = PresentationStore::new(settings);
        assert_eq!(restarted.mode(), PresentationMode::Overlay);
        assert!(!restarted.is_open());
    }

    #[test]
    fn test_persistence_failure_keeps_in_memory_mode() {
        let (store, settings) = store();
        settings.fail_saves(true);
        store
            .switch_mode(PresentationMode::Overlay, OnCross::Forbid)
            .unwrap();
        assert_eq!(store.mode(), PresentationMode::Overlay);
    }

    #[test]
    fn test_update_draft_only_while_open() {
        let (store, _) = store();
        assert!(!store.update_draft(|d| d.content.push_str("lost")));
        store.open(OpenConfig::default());
        assert!(store.update_draft(|d| d.content.push_str("kept")));
        assert_eq!(store.draft().content, "kept");
    }

    #[test]
    fn test_update_draft_for_targets_only_matching_document() {
        let (store, _) = store();
        store.open(OpenConfig::default().with_document_id("doc-1"));
        assert!(store.update_draft_for("doc-1", |d| d.content.push_str("a")));

        store.open(OpenConfig::default().with_document_id("doc-2"));
        assert!(!store.update_draft_for("doc-1", |d| d.content.push_str("b")));
        assert_eq!(store.draft(), DocumentDraft::default());

        store.close();
        assert!(!store.update_draft_for("doc-2", |d| d.content.push_str("c")));
    }

    #[test]
    fn test_fullscreen_access() {
        let (store, _) = store();
        assert_eq!(store.fullscreen_access(), FullscreenAccess::Redirect);
        store.open(OpenConfig::default().with_document_id("doc-2"));
        assert!(matches!(
            store.fullscreen_access(),
            FullscreenAccess::Granted { document_id: Some(ref id), .. } if id == "doc-2"
        ));
    }
}
