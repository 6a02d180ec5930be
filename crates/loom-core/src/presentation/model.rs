//! Presentation state types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the three ways the document editor is displayed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PresentationMode {
    /// Drawer docked next to the current page.
    #[default]
    Embedded,
    /// Centered overlay above the current page.
    Overlay,
    /// Dedicated navigable location.
    Fullscreen,
}

impl PresentationMode {
    pub fn is_fullscreen(self) -> bool {
        self == Self::Fullscreen
    }

    /// Cycle order used by `toggle_mode`: embedded, overlay, fullscreen.
    pub fn next(self) -> Self {
        match self {
            Self::Embedded => Self::Overlay,
            Self::Overlay => Self::Fullscreen,
            Self::Fullscreen => Self::Embedded,
        }
    }

    /// Whether moving between `self` and `other` leaves the current location.
    pub fn crosses_boundary(self, other: Self) -> bool {
        self.is_fullscreen() != other.is_fullscreen()
    }
}

/// In-memory document draft shown before (or without) a remote round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub description: String,
    pub content: String,
}

impl DocumentDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Snapshot of the presentation store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresentationState {
    pub is_open: bool,
    pub mode: PresentationMode,
    pub draft: DocumentDraft,
    /// Remote id of the open document, once known.
    pub document_id: Option<String>,
}

/// Parameters of `PresentationStore::open`.
#[derive(Debug, Clone, Default)]
pub struct OpenConfig {
    /// Forces a mode instead of the last persisted one.
    pub mode: Option<PresentationMode>,
    pub draft: Option<DocumentDraft>,
    pub document_id: Option<String>,
}

impl OpenConfig {
    pub fn with_mode(mut self, mode: PresentationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_draft(mut self, draft: DocumentDraft) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryDirection {
    EnterFullscreen,
    LeaveFullscreen,
}

/// Handed to the navigation hook when a mode switch leaves or enters the
/// full-screen location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCrossing {
    pub from: PresentationMode,
    pub to: PresentationMode,
    pub document_id: Option<String>,
}

impl BoundaryCrossing {
    pub fn direction(&self) -> BoundaryDirection {
        if self.to.is_fullscreen() {
            BoundaryDirection::EnterFullscreen
        } else {
            BoundaryDirection::LeaveFullscreen
        }
    }
}

/// How the caller handles a transition across the full-screen boundary.
pub enum OnCross<'a> {
    /// The caller cannot navigate; crossing transitions are refused.
    Forbid,
    /// Invoked once, after the new mode is stored and persisted.
    Call(&'a mut dyn FnMut(BoundaryCrossing)),
}

/// Outcome of a successful mode switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeTransition {
    Unchanged(PresentationMode),
    /// Same-family change applied in place.
    InPlace {
        from: PresentationMode,
        to: PresentationMode,
    },
    /// The navigation hook was invoked.
    Crossed(BoundaryCrossing),
}

impl ModeTransition {
    pub fn mode(&self) -> PresentationMode {
        match self {
            Self::Unchanged(mode) => *mode,
            Self::InPlace { to, .. } => *to,
            Self::Crossed(crossing) => crossing.to,
        }
    }
}

/// Verdict for a visit to the full-screen document location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullscreenAccess {
    Granted {
        document_id: Option<String>,
        draft: DocumentDraft,
    },
    /// No document is legitimately open (deep link, reload).
    Redirect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_toggle_cycle_returns_to_start() {
        for mode in PresentationMode::iter() {
            assert_eq!(mode.next().next().next(), mode);
        }
        assert_eq!(PresentationMode::Embedded.next(), PresentationMode::Overlay);
        assert_eq!(PresentationMode::Overlay.next(), PresentationMode::Fullscreen);
    }

    #[test]
    fn test_crosses_boundary() {
        use PresentationMode::*;
        assert!(!Embedded.crosses_boundary(Overlay));
        assert!(Overlay.crosses_boundary(Fullscreen));
        assert!(Fullscreen.crosses_boundary(Embedded));
        assert!(!Fullscreen.crosses_boundary(Fullscreen));
    }

    #[test]
    fn test_mode_parses_from_str() {
        assert_eq!(
            PresentationMode::from_str("overlay").unwrap(),
            PresentationMode::Overlay
        );
        assert!(PresentationMode::from_str("sidebar").is_err());
        assert_eq!(PresentationMode::Fullscreen.to_string(), "fullscreen");
    }
}
