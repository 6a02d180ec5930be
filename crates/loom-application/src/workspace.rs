//! Process-wide orchestrator services and the operations that span them.

use std::sync::Arc;

use anyhow::{Context, Result};
use loom_core::activator::{ActivatorDecision, ActivatorResolver};
use loom_core::config::LoomConfig;
use loom_core::error::Result as LoomResult;
use loom_core::intent::{Intent, IntentInput};
use loom_core::panel::PanelVisibility;
use loom_core::ports::{AuthProvider, ContentGenerator, Navigator, RemoteDataLayer, routes};
use loom_core::presentation::{
    BoundaryCrossing, FullscreenAccess, ModeTransition, OnCross, OpenConfig, PresentationMode,
    PresentationState, PresentationStore,
};
use loom_core::scene::{ActivatorAction, ContextStack, SceneBinding, SceneDescriptor, SceneId};
use loom_core::settings::UiSettingsRepository;
use loom_infrastructure::{
    ConfigAuthProvider, ConfigService, HistoryNavigator, HttpRemoteDataLayer, LoomPaths,
    TomlUiSettingsRepository,
};
use tokio_util::task::TaskTracker;

use crate::fullscreen::FullscreenNavigation;
use crate::handlers::{
    AppFactoryHandler, AppFactorySlice, ChatHandler, ChatSlice, DocumentHandler, DocumentSlice,
};
use crate::router::IntentRouter;

/// External collaborators the workspace is wired with.
#[derive(Clone)]
pub struct Collaborators {
    pub remote: Arc<dyn RemoteDataLayer>,
    pub generator: Arc<dyn ContentGenerator>,
    pub navigator: Arc<dyn Navigator>,
    pub auth: Arc<dyn AuthProvider>,
    pub settings: Arc<dyn UiSettingsRepository>,
}

/// Owns the context stack, panel visibility, presentation store, router
/// and handlers for the lifetime of the process.
///
/// Created once at startup; [`Workspace::shutdown`] waits for background
/// generation still in flight.
pub struct Workspace {
    stack: Arc<ContextStack>,
    panel: Arc<PanelVisibility>,
    presentation: Arc<PresentationStore>,
    resolver: ActivatorResolver,
    router: IntentRouter,
    chat: Arc<ChatHandler>,
    documents: Arc<DocumentHandler>,
    apps: Arc<AppFactoryHandler>,
    navigator: Arc<dyn Navigator>,
    fullscreen: Arc<FullscreenNavigation>,
    tasks: TaskTracker,
}

impl Workspace {
    pub fn new(collaborators: Collaborators, home_path: impl Into<String>) -> Self {
        let Collaborators {
            remote,
            generator,
            navigator,
            auth,
            settings,
        } = collaborators;

        let stack = Arc::new(ContextStack::new());
        let panel = Arc::new(PanelVisibility::new(settings.clone()));
        let presentation = Arc::new(PresentationStore::new(settings));
        let resolver = ActivatorResolver::new(stack.clone(), panel.clone());
        let tasks = TaskTracker::new();
        let fullscreen = Arc::new(FullscreenNavigation::new(navigator.clone(), home_path));

        let chat = Arc::new(ChatHandler::new(
            remote.clone(),
            generator.clone(),
            navigator.clone(),
            auth.clone(),
            tasks.clone(),
        ));
        let documents = Arc::new(DocumentHandler::new(
            remote.clone(),
            generator,
            fullscreen.clone(),
            auth.clone(),
            presentation.clone(),
            tasks.clone(),
        ));
        let apps = Arc::new(AppFactoryHandler::new(remote, navigator.clone(), auth));

        let router = IntentRouter::builder()
            .register(chat.clone())
            .register(documents.clone())
            .register(apps.clone())
            .build();

        tracing::info!(
            panel_visible = panel.is_visible(),
            mode = %presentation.mode(),
            "[Workspace] Started"
        );

        Self {
            stack,
            panel,
            presentation,
            resolver,
            router,
            chat,
            documents,
            apps,
            navigator,
            fullscreen,
            tasks,
        }
    }

    /// Wires the workspace from the files under `paths`: user config,
    /// persisted UI settings, HTTP remote and config-backed auth.
    pub fn bootstrap(paths: &LoomPaths) -> Result<(Self, LoomConfig)> {
        let config = ConfigService::new(paths)?
            .load()
            .context("Failed to load configuration")?;
        let settings = Arc::new(TomlUiSettingsRepository::new(paths)?);
        let http = Arc::new(
            HttpRemoteDataLayer::new(&config.remote).context("Failed to build HTTP client")?,
        );

        let collaborators = Collaborators {
            remote: http.clone(),
            generator: http,
            navigator: Arc::new(HistoryNavigator::new(config.routes.home.clone())),
            auth: Arc::new(ConfigAuthProvider::new(&config.auth)),
            settings,
        };
        let workspace = Self::new(collaborators, config.routes.home.clone());
        Ok((workspace, config))
    }

    /// Stops accepting background work and waits for what is in flight.
    pub async fn shutdown(&self) {
        self.tasks.close();
        if !self.tasks.is_empty() {
            tracing::info!(
                pending = self.tasks.len(),
                "[Workspace] Waiting for background generation"
            );
        }
        self.tasks.wait().await;
        tracing::info!("[Workspace] Shut down");
    }

    pub fn stack(&self) -> &Arc<ContextStack> {
        &self.stack
    }

    pub fn panel(&self) -> &Arc<PanelVisibility> {
        &self.panel
    }

    pub fn presentation(&self) -> &Arc<PresentationStore> {
        &self.presentation
    }

    pub fn resolver(&self) -> &ActivatorResolver {
        &self.resolver
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn home_path(&self) -> &str {
        self.fullscreen.home_path()
    }

    pub async fn chat_slice(&self) -> ChatSlice {
        self.chat.slice().await
    }

    pub async fn document_slice(&self) -> DocumentSlice {
        self.documents.slice().await
    }

    pub async fn app_factory_slice(&self) -> AppFactorySlice {
        self.apps.slice().await
    }

    // ---- scenes ----

    /// Registers a scene for as long as the returned binding lives.
    pub fn enter_scene(&self, descriptor: SceneDescriptor) -> SceneBinding {
        tracing::debug!(scene_id = %descriptor.id, "[Workspace] Scene entered");
        self.stack.bind(descriptor)
    }

    /// Registers the scene of a new page and settles the panel for the
    /// switch: closed, unless the location asks for it with
    /// `?assistant=open`.
    pub fn switch_context(&self, descriptor: SceneDescriptor) -> SceneBinding {
        let wants_panel = self
            .navigator
            .current_query_param(routes::ASSISTANT_QUERY_PARAM)
            .is_some_and(|value| value == "open");
        if wants_panel {
            self.panel.request_open_after_switch();
        }
        let binding = self.enter_scene(descriptor);
        let visible = self.panel.on_context_switch();
        tracing::info!(scene_id = %binding.id(), panel_visible = visible, "[Workspace] Context switched");
        binding
    }

    pub fn activator(&self) -> ActivatorDecision {
        self.resolver.resolve()
    }

    /// Handles a click on `scene_id`'s activator and returns the action
    /// taken, or `None` when that scene does not own the activator.
    pub fn activate(&self, scene_id: &SceneId) -> Option<ActivatorAction> {
        let action = self.resolver.interaction(scene_id)?;
        tracing::debug!(%scene_id, ?action, "[Workspace] Activator interaction");
        match &action {
            ActivatorAction::OpenPanel => self.panel.set_visible(true),
            ActivatorAction::TogglePanel => {
                self.panel.toggle();
            }
            // A boundary crossing already navigated; it wins over `navigate_to`.
            ActivatorAction::SwitchPresentation { mode, navigate_to } => {
                match self.switch_presentation(*mode) {
                    Ok(ModeTransition::Crossed(_)) => {}
                    Ok(_) => {
                        if let Some(path) = navigate_to {
                            self.navigator.navigate_to(path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(%scene_id, "[Workspace] Activator mode switch failed: {}", e)
                    }
                }
            }
            ActivatorAction::Navigate { path } => self.navigator.navigate_to(path),
        }
        Some(action)
    }

    // ---- presentation ----

    /// Opens a document; navigates to the full-screen location when the
    /// resulting mode is full-screen.
    pub fn open_document(&self, config: OpenConfig) -> PresentationState {
        let state = self.presentation.open(config);
        if state.mode.is_fullscreen() {
            self.fullscreen.enter(state.document_id.as_deref());
        }
        state
    }

    /// Closes the document, leaving the full-screen location if needed.
    pub fn close_document(&self) {
        let on_fullscreen = self.fullscreen.is_current();
        self.presentation.close();
        if on_fullscreen {
            self.fullscreen.leave();
        }
    }

    /// Switches mode, navigating when the full-screen boundary is crossed.
    pub fn switch_presentation(&self, mode: PresentationMode) -> LoomResult<ModeTransition> {
        let mut navigate = |crossing: BoundaryCrossing| self.fullscreen.follow(crossing);
        self.presentation
            .switch_mode(mode, OnCross::Call(&mut navigate))
    }

    pub fn toggle_presentation(&self) -> LoomResult<ModeTransition> {
        let mut navigate = |crossing: BoundaryCrossing| self.fullscreen.follow(crossing);
        self.presentation.toggle_mode(OnCross::Call(&mut navigate))
    }

    /// Checks a visit to the full-screen location. Redirects home unless a
    /// document is legitimately open.
    pub fn guard_fullscreen_route(&self) -> FullscreenAccess {
        let access = self.presentation.fullscreen_access();
        if matches!(access, FullscreenAccess::Redirect) {
            tracing::warn!(
                path = %self.navigator.current_path(),
                "[Workspace] Full-screen location visited without an open document; redirecting"
            );
            self.fullscreen.redirect_home();
        }
        access
    }

    // ---- intents ----

    pub async fn dispatch(&self, intent: &Intent) -> bool {
        self.router.dispatch(intent).await
    }

    pub async fn dispatch_named(&self, name: &str, summary: &str, input: IntentInput) -> bool {
        self.router.dispatch_named(name, summary, input).await
    }
}
