use anyhow::{Context, Result};
use loom_core::settings::UiSettingsRepository;
use loom_infrastructure::{ConfigService, LoomPaths, ServiceType, TomlUiSettingsRepository};

pub fn run(paths: &LoomPaths) -> Result<()> {
    let config_service = ConfigService::new(paths)?;
    let config = config_service
        .load()
        .context("Failed to load configuration")?;
    let settings = TomlUiSettingsRepository::new(paths)?
        .load()
        .context("Failed to load UI settings")?;

    println!("📋 loom status");
    println!("  Config:            {}", config_service.path().display());
    println!("  UI state:          {}", paths.get_path(ServiceType::UiState)?.display());
    println!("  Remote:            {}", config.remote.base_url);
    let token = if config.remote.api_token.is_some() {
        "set"
    } else {
        "not set"
    };
    println!("  API token:         {}", token);
    println!(
        "  Signed in as:      {}",
        config.auth.user_id.as_deref().unwrap_or("(signed out)")
    );
    println!("  Default model:     {}", config.default_model);
    println!("  Panel visible:     {}", settings.panel_visible);
    println!("  Presentation mode: {}", settings.presentation_mode);
    Ok(())
}
