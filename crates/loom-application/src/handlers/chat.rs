//! Chat feature handler.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::StreamExt;
use loom_core::LoomError;
use loom_core::intent::{FeatureHandler, Intent, IntentTarget};
use loom_core::ports::{
    AuthProvider, ChatMessage, ContentGenerator, EntityKind, GenerationRequest, Navigator,
    RemoteDataLayer, routes,
};
use serde_json::json;
use tokio::sync::RwLock;
use tokio_util::task::TaskTracker;

use crate::generation::GENERATION_TARGET;

/// State of the chat module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSlice {
    pub active_chat_id: Option<String>,
    /// Messages of the active chat, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Reply text received so far while `streaming`.
    pub pending_reply: String,
    pub streaming: bool,
}

/// Creates a chat from the prompt, sends the first message and streams
/// the reply in the background.
pub struct ChatHandler {
    remote: Arc<dyn RemoteDataLayer>,
    generator: Arc<dyn ContentGenerator>,
    navigator: Arc<dyn Navigator>,
    auth: Arc<dyn AuthProvider>,
    slice: Arc<RwLock<ChatSlice>>,
    tasks: TaskTracker,
}

impl ChatHandler {
    pub fn new(
        remote: Arc<dyn RemoteDataLayer>,
        generator: Arc<dyn ContentGenerator>,
        navigator: Arc<dyn Navigator>,
        auth: Arc<dyn AuthProvider>,
        tasks: TaskTracker,
    ) -> Self {
        Self {
            remote,
            generator,
            navigator,
            auth,
            slice: Arc::new(RwLock::new(ChatSlice::default())),
            tasks,
        }
    }

    pub async fn slice(&self) -> ChatSlice {
        self.slice.read().await.clone()
    }

    async fn try_handle(&self, intent: &Intent) -> Result<()> {
        if !self.auth.is_signed_in() {
            return Err(LoomError::Unauthenticated.into());
        }
        let prompt = intent.input.prompt.trim();
        if prompt.is_empty() {
            return Err(anyhow!("Chat prompt is empty"));
        }

        let chat_id = self
            .remote
            .create_entity(
                EntityKind::Chat,
                json!({
                    "title": intent.title(),
                    "modelId": intent.input.model_id,
                    "userId": self.auth.user_id(),
                }),
            )
            .await?;
        tracing::info!("[ChatHandler] Created chat {}", chat_id);

        let first = ChatMessage::user(prompt);
        self.remote.append_message(&chat_id, &first).await?;

        {
            let mut slice = self.slice.write().await;
            *slice = ChatSlice {
                active_chat_id: Some(chat_id.clone()),
                messages: vec![first],
                pending_reply: String::new(),
                streaming: true,
            };
        }

        self.navigator.navigate_to(&routes::chat(&chat_id));

        let request = GenerationRequest {
            prompt: prompt.to_string(),
            model_id: intent.input.model_id.clone(),
            api_key: intent.input.api_key.clone(),
            instruction: None,
        };
        self.spawn_reply(chat_id, request);
        Ok(())
    }

    fn spawn_reply(&self, chat_id: String, request: GenerationRequest) {
        let remote = self.remote.clone();
        let generator = self.generator.clone();
        let slice = self.slice.clone();
        let model_id = request.model_id.clone();

        self.tasks.spawn(async move {
            let outcome: loom_core::error::Result<ChatMessage> = async {
                let mut stream = generator.generate(request).await?;
                let mut content = String::new();
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    {
                        // Waits out readers so the preview never skips a chunk.
                        let mut slice = slice.write().await;
                        if slice.active_chat_id.as_deref() == Some(chat_id.as_str()) {
                            slice.pending_reply.push_str(&chunk);
                        }
                    }
                    content.push_str(&chunk);
                }
                let reply = ChatMessage::assistant(content, model_id);
                remote.append_message(&chat_id, &reply).await?;
                Ok(reply)
            }
            .await;

            let mut slice = slice.write().await;
            let is_active = slice.active_chat_id.as_deref() == Some(chat_id.as_str());
            match outcome {
                Ok(reply) => {
                    tracing::info!(target: GENERATION_TARGET, "Reply stored for chat {}", chat_id);
                    if is_active {
                        slice.messages.push(reply);
                    }
                }
                Err(e) => {
                    tracing::error!(
                        target: GENERATION_TARGET,
                        "Reply generation failed for chat {}: {}",
                        chat_id,
                        e
                    );
                }
            }
            if is_active {
                slice.pending_reply.clear();
                slice.streaming = false;
            }
        });
    }
}

#[async_trait]
impl FeatureHandler for ChatHandler {
    fn target(&self) -> IntentTarget {
        IntentTarget::Chat
    }

    async fn handle(&self, intent: &Intent) -> bool {
        match self.try_handle(intent).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[ChatHandler] Intent not fulfilled: {}", e);
                false
            }
        }
    }
}
