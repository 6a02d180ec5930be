//! App factory handler.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use loom_core::LoomError;
use loom_core::intent::{FeatureHandler, Intent, IntentTarget};
use loom_core::ports::{AuthProvider, EntityKind, Navigator, RemoteDataLayer, routes};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::Display;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppBuildStatus {
    #[default]
    Idle,
    Creating,
    Created,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFactorySlice {
    pub app_id: Option<String>,
    pub status: AppBuildStatus,
}

/// Creates an app entity from the prompt and opens the app factory on it.
pub struct AppFactoryHandler {
    remote: Arc<dyn RemoteDataLayer>,
    navigator: Arc<dyn Navigator>,
    auth: Arc<dyn AuthProvider>,
    slice: RwLock<AppFactorySlice>,
}

impl AppFactoryHandler {
    pub fn new(
        remote: Arc<dyn RemoteDataLayer>,
        navigator: Arc<dyn Navigator>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            remote,
            navigator,
            auth,
            slice: RwLock::new(AppFactorySlice::default()),
        }
    }

    pub async fn slice(&self) -> AppFactorySlice {
        self.slice.read().await.clone()
    }

    async fn try_handle(&self, intent: &Intent) -> Result<()> {
        if !self.auth.is_signed_in() {
            return Err(LoomError::Unauthenticated.into());
        }
        if intent.input.prompt.trim().is_empty() {
            bail!("App description is empty");
        }

        self.slice.write().await.status = AppBuildStatus::Creating;

        let created = self
            .remote
            .create_entity(
                EntityKind::App,
                json!({
                    "name": intent.title(),
                    "prompt": intent.input.prompt,
                    "modelId": intent.input.model_id,
                    "flags": intent.input.flags,
                    "userId": self.auth.user_id(),
                }),
            )
            .await
            .context("Failed to create app");

        let app_id = match created {
            Ok(id) => id,
            Err(e) => {
                self.slice.write().await.status = AppBuildStatus::Failed;
                return Err(e);
            }
        };
        tracing::info!(entity_id = %app_id, "[AppFactoryHandler] Created app");

        *self.slice.write().await = AppFactorySlice {
            app_id: Some(app_id.clone()),
            status: AppBuildStatus::Created,
        };
        self.navigator.navigate_to(&routes::app(&app_id));
        Ok(())
    }
}

#[async_trait]
impl FeatureHandler for AppFactoryHandler {
    fn target(&self) -> IntentTarget {
        IntentTarget::AppFactory
    }

    async fn handle(&self, intent: &Intent) -> bool {
        match self.try_handle(intent).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[AppFactoryHandler] Intent not fulfilled: {:#}", e);
                false
            }
        }
    }
}
