//! Persisted UI settings.

use serde::{Deserialize, Serialize};

use crate::presentation::PresentationMode;

/// UI state that survives restarts.
///
/// Only these two fields are persisted. Whether a document is open, its
/// draft, and the registered scenes always start fresh, so a reload can
/// never resurrect a stale "open" flag.
///
/// # File Location
///
/// - Linux: `~/.config/loom/ui_state.toml`
/// - macOS: `~/Library/Application Support/loom/ui_state.toml`
/// - Windows: `%APPDATA%\loom\ui_state.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the assistant conversation panel is shown.
    pub panel_visible: bool,
    /// Last chosen document presentation mode.
    pub presentation_mode: PresentationMode,
}
