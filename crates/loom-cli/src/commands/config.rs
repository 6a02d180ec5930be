use anyhow::{Context, Result};
use loom_infrastructure::{ConfigService, LoomPaths};

pub fn init(paths: &LoomPaths) -> Result<()> {
    let service = ConfigService::new(paths)?;
    let existed = service.path().exists();
    let path = service
        .ensure_config_file()
        .context("Failed to create config.toml")?;

    if existed {
        println!("✓ Config already present: {}", path.display());
    } else {
        println!("✅ Wrote default config: {}", path.display());
        println!("\n💡 Set auth.user_id to sign in and remote.base_url to your backend.");
    }
    Ok(())
}
