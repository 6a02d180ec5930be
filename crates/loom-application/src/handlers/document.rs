//! Document generation handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use loom_core::LoomError;
use loom_core::intent::{FeatureHandler, Intent, IntentTarget};
use loom_core::ports::{
    AuthProvider, ContentGenerator, EntityKind, GenerationRequest, RemoteDataLayer,
};
use loom_core::presentation::{DocumentDraft, OpenConfig, PresentationStore};
use serde_json::json;
use tokio::sync::RwLock;
use tokio_util::task::TaskTracker;

use crate::fullscreen::FullscreenNavigation;
use crate::generation::{GENERATION_TARGET, stream_to_string};

const DOCUMENT_INSTRUCTION: &str =
    "Write a complete, well-structured document that fulfills the request.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSlice {
    pub document_id: Option<String>,
    pub generating: bool,
}

/// Creates a document, opens it in the presentation store and streams the
/// generated body into the draft.
pub struct DocumentHandler {
    remote: Arc<dyn RemoteDataLayer>,
    generator: Arc<dyn ContentGenerator>,
    fullscreen: Arc<FullscreenNavigation>,
    auth: Arc<dyn AuthProvider>,
    presentation: Arc<PresentationStore>,
    slice: Arc<RwLock<DocumentSlice>>,
    tasks: TaskTracker,
}

impl DocumentHandler {
    pub fn new(
        remote: Arc<dyn RemoteDataLayer>,
        generator: Arc<dyn ContentGenerator>,
        fullscreen: Arc<FullscreenNavigation>,
        auth: Arc<dyn AuthProvider>,
        presentation: Arc<PresentationStore>,
        tasks: TaskTracker,
    ) -> Self {
        Self {
            remote,
            generator,
            fullscreen,
            auth,
            presentation,
            slice: Arc::new(RwLock::new(DocumentSlice::default())),
            tasks,
        }
    }

    pub async fn slice(&self) -> DocumentSlice {
        self.slice.read().await.clone()
    }

    async fn try_handle(&self, intent: &Intent) -> Result<()> {
        if !self.auth.is_signed_in() {
            return Err(LoomError::Unauthenticated.into());
        }

        let title = intent.title();
        let document_id = self
            .remote
            .create_entity(
                EntityKind::Document,
                json!({
                    "title": title,
                    "description": intent.input.prompt,
                    "modelId": intent.input.model_id,
                    "userId": self.auth.user_id(),
                }),
            )
            .await
            .context("Failed to create document")?;
        tracing::info!(entity_id = %document_id, "[DocumentHandler] Created document");

        let draft = DocumentDraft {
            title,
            description: intent.input.prompt.clone(),
            content: String::new(),
        };
        let opened = self.presentation.open(
            OpenConfig::default()
                .with_draft(draft)
                .with_document_id(document_id.clone()),
        );

        *self.slice.write().await = DocumentSlice {
            document_id: Some(document_id.clone()),
            generating: true,
        };

        if opened.mode.is_fullscreen() {
            self.fullscreen.enter(Some(&document_id));
        }

        let request = GenerationRequest {
            prompt: intent.input.prompt.clone(),
            model_id: intent.input.model_id.clone(),
            api_key: intent.input.api_key.clone(),
            instruction: Some(DOCUMENT_INSTRUCTION.to_string()),
        };
        self.spawn_generation(document_id, request);
        Ok(())
    }

    fn spawn_generation(&self, document_id: String, request: GenerationRequest) {
        let remote = self.remote.clone();
        let generator = self.generator.clone();
        let presentation = self.presentation.clone();
        let slice = self.slice.clone();

        self.tasks.spawn(async move {
            let outcome: loom_core::error::Result<usize> = async {
                let target = document_id.clone();
                let content = stream_to_string(generator.as_ref(), request, move |chunk| {
                    // No-op once another document has been opened.
                    presentation.update_draft_for(&target, |draft| draft.content.push_str(chunk));
                })
                .await?;
                let written = content.len();
                remote
                    .patch_field(EntityKind::Document, &document_id, "content", json!(content))
                    .await?;
                Ok(written)
            }
            .await;

            match outcome {
                Ok(bytes) => tracing::info!(
                    target: GENERATION_TARGET,
                    entity_id = %document_id,
                    bytes,
                    "Document content stored"
                ),
                Err(e) => tracing::error!(
                    target: GENERATION_TARGET,
                    entity_id = %document_id,
                    "Document generation failed: {}",
                    e
                ),
            }

            let mut slice = slice.write().await;
            if slice.document_id.as_deref() == Some(document_id.as_str()) {
                slice.generating = false;
            }
        });
    }
}

#[async_trait]
impl FeatureHandler for DocumentHandler {
    fn target(&self) -> IntentTarget {
        IntentTarget::Document
    }

    async fn handle(&self, intent: &Intent) -> bool {
        match self.try_handle(intent).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[DocumentHandler] Intent not fulfilled: {:#}", e);
                false
            }
        }
    }
}
