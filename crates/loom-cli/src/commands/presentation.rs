use std::sync::Arc;

use anyhow::Result;
use loom_core::presentation::{OnCross, PresentationMode, PresentationStore};
use loom_infrastructure::{LoomPaths, TomlUiSettingsRepository};

/// Records the preferred mode. No document is open in a CLI process, so
/// this never crosses the full-screen boundary.
pub fn set_mode(paths: &LoomPaths, mode: PresentationMode) -> Result<()> {
    let store = PresentationStore::new(Arc::new(TomlUiSettingsRepository::new(paths)?));
    let transition = store.switch_mode(mode, OnCross::Forbid)?;
    tracing::debug!(?transition, "Presentation preference updated");
    println!("✓ Presentation mode: {}", store.mode());
    Ok(())
}
