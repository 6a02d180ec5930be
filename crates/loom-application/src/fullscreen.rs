//! Navigation into and out of the full-screen document location.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use loom_core::ports::{Navigator, routes};
use loom_core::presentation::{BoundaryCrossing, BoundaryDirection};

/// Remembers where the user was before entering the full-screen location so
/// that leaving it returns there.
///
/// Shared by every path that can reach the full-screen location, so the
/// return slot is written no matter who triggered the navigation.
pub struct FullscreenNavigation {
    navigator: Arc<dyn Navigator>,
    home_path: String,
    return_path: Mutex<Option<String>>,
}

impl FullscreenNavigation {
    pub fn new(navigator: Arc<dyn Navigator>, home_path: impl Into<String>) -> Self {
        Self {
            navigator,
            home_path: home_path.into(),
            return_path: Mutex::new(None),
        }
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn is_current(&self) -> bool {
        routes::is_document_fullscreen(&self.navigator.current_path())
    }

    /// Recorded return location, if any.
    pub fn return_path(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Navigates to the full-screen location for `document_id`. The current
    /// path is recorded unless it already is a full-screen path.
    pub fn enter(&self, document_id: Option<&str>) {
        let current = self.navigator.current_path();
        if !routes::is_document_fullscreen(&current) {
            *self.slot() = Some(current);
        }
        let target = routes::document_fullscreen(document_id);
        tracing::debug!(path = %target, "[FullscreenNavigation] Entering");
        self.navigator.navigate_to(&target);
    }

    /// Navigates back to the recorded location, or home when none is known.
    pub fn leave(&self) {
        let target = self
            .slot()
            .take()
            .unwrap_or_else(|| self.home_path.clone());
        tracing::debug!(path = %target, "[FullscreenNavigation] Leaving");
        self.navigator.navigate_to(&target);
    }

    pub fn follow(&self, crossing: BoundaryCrossing) {
        match crossing.direction() {
            BoundaryDirection::EnterFullscreen => self.enter(crossing.document_id.as_deref()),
            BoundaryDirection::LeaveFullscreen => self.leave(),
        }
    }

    /// Sends the user home without touching the return slot.
    pub fn redirect_home(&self) {
        self.navigator.navigate_to(&self.home_path);
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.return_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
