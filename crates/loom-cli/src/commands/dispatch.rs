use anyhow::{Result, bail};
use loom_application::Workspace;
use loom_core::intent::{Intent, IntentInput, IntentTarget};
use loom_core::scene::{ActivatorPlacement, SceneDescriptor, SceneId, SceneKind};
use loom_infrastructure::LoomPaths;
use std::str::FromStr;

pub struct DispatchRequest {
    pub intent: String,
    pub prompt: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub summary: String,
}

pub async fn run(paths: &LoomPaths, request: DispatchRequest) -> Result<()> {
    let (workspace, config) = Workspace::bootstrap(paths)?;
    // Mounting only; a context switch would close a persisted-open panel.
    let _home = workspace.enter_scene(SceneDescriptor::new(
        SceneId::fixed("home"),
        SceneKind::Home,
        ActivatorPlacement::Global,
    ));

    let model = request.model.unwrap_or(config.default_model);
    let mut input = IntentInput::new(request.prompt, model);
    if let Some(key) = request.api_key {
        input = input.with_api_key(key);
    }
    let intent = Intent::new(request.intent, request.summary, input);

    println!("🚀 Dispatching '{}' intent...", intent.target);
    let fulfilled = workspace.dispatch(&intent).await;
    workspace.shutdown().await;

    if !fulfilled {
        bail!(
            "Intent '{}' was not fulfilled (see log for details); please retry",
            intent.target
        );
    }

    println!("✅ Done. Location: {}", workspace.navigator().current_path());
    match IntentTarget::from_str(&intent.target) {
        Ok(IntentTarget::Chat) => {
            let slice = workspace.chat_slice().await;
            for message in &slice.messages {
                println!("\n[{}]\n{}", message.role, message.content);
            }
        }
        Ok(IntentTarget::Document) => {
            let draft = workspace.presentation().draft();
            println!("\n# {}\n\n{}", draft.title, draft.content);
        }
        Ok(IntentTarget::AppFactory) => {
            let slice = workspace.app_factory_slice().await;
            println!(
                "  App: {} ({})",
                slice.app_id.as_deref().unwrap_or("-"),
                slice.status
            );
        }
        Err(_) => {}
    }
    Ok(())
}
