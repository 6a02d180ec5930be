use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use loom_core::presentation::PresentationMode;
use loom_infrastructure::{ConfigService, LoomPaths};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "loom")]
#[command(about = "loom - context & presentation orchestrator for an AI workspace", long_about = None)]
struct Cli {
    /// Configuration directory (defaults to $LOOM_HOME, then the user config dir)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show persisted UI settings and configuration
    Status,
    /// Set the preferred presentation mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Show, hide or toggle the assistant panel
    Panel {
        #[arg(value_enum)]
        action: PanelAction,
    },
    /// Route an intent to its feature handler
    Dispatch {
        /// Target module: chat, document or app_factory
        intent: String,
        prompt: String,
        /// Model id (defaults to the configured default_model)
        #[arg(long)]
        model: Option<String>,
        /// Credential forwarded to the generation backend
        #[arg(long, env = "LOOM_MODEL_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Short summary used as the entity title
        #[arg(long, default_value = "")]
        summary: String,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Embedded,
    Overlay,
    Fullscreen,
}

impl From<ModeArg> for PresentationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Embedded => PresentationMode::Embedded,
            ModeArg::Overlay => PresentationMode::Overlay,
            ModeArg::Fullscreen => PresentationMode::Fullscreen,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PanelAction {
    Show,
    Hide,
    Toggle,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config.toml if none exists
    Init,
}

fn init_tracing(paths: &LoomPaths) {
    // A broken config must not prevent logging; commands report it later.
    let configured = ConfigService::new(paths)
        .and_then(|service| service.load())
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = LoomPaths::new(cli.home);
    init_tracing(&paths);

    match cli.command {
        Commands::Status => commands::status::run(&paths)?,
        Commands::Mode { mode } => commands::presentation::set_mode(&paths, mode.into())?,
        Commands::Panel { action } => commands::panel::run(&paths, action)?,
        Commands::Dispatch {
            intent,
            prompt,
            model,
            api_key,
            summary,
        } => {
            let request = commands::dispatch::DispatchRequest {
                intent,
                prompt,
                model,
                api_key,
                summary,
            };
            commands::dispatch::run(&paths, request).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&paths)?,
        },
    }

    Ok(())
}
