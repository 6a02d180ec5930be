use std::sync::Arc;

use anyhow::Result;
use loom_core::panel::PanelVisibility;
use loom_infrastructure::{LoomPaths, TomlUiSettingsRepository};

use crate::PanelAction;

pub fn run(paths: &LoomPaths, action: PanelAction) -> Result<()> {
    let panel = PanelVisibility::new(Arc::new(TomlUiSettingsRepository::new(paths)?));

    let visible = match action {
        PanelAction::Show => {
            panel.set_visible(true);
            true
        }
        PanelAction::Hide => {
            panel.set_visible(false);
            false
        }
        PanelAction::Toggle => panel.toggle(),
    };

    println!(
        "✓ Assistant panel {}",
        if visible { "visible" } else { "hidden" }
    );
    Ok(())
}
