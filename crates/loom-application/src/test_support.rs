//! Hand-written collaborator mocks shared by the handler tests.

use async_trait::async_trait;
use futures::StreamExt;
use loom_core::error::{LoomError, Result};
use loom_core::ports::{
    AuthProvider, ChatMessage, ChunkStream, ContentGenerator, EntityKind, EntityRecord,
    GenerationRequest, RemoteDataLayer,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create(EntityKind, serde_json::Value),
    List(EntityKind),
    Append(String, ChatMessage),
    Patch(EntityKind, String, String, serde_json::Value),
}

/// Records every call; can be told to reject one operation.
#[derive(Default)]
pub struct MockRemote {
    calls: Mutex<Vec<RemoteCall>>,
    fail_on: Mutex<Option<&'static str>>,
    next_id: AtomicUsize,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// `op` is one of "create", "list", "append", "patch".
    pub fn failing(op: &'static str) -> Self {
        let remote = Self::default();
        *remote.fail_on.lock().unwrap() = Some(op);
        remote
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, call: RemoteCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(op) {
            return Err(LoomError::remote(Some(500), format!("{op} rejected")));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteDataLayer for MockRemote {
    async fn create_entity(&self, kind: EntityKind, payload: serde_json::Value) -> Result<String> {
        self.record("create", RemoteCall::Create(kind, payload))?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{}-{}", kind, n))
    }

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        self.record("list", RemoteCall::List(kind))?;
        Ok(Vec::new())
    }

    async fn append_message(&self, chat_id: &str, message: &ChatMessage) -> Result<()> {
        self.record(
            "append",
            RemoteCall::Append(chat_id.to_string(), message.clone()),
        )
    }

    async fn patch_field(
        &self,
        kind: EntityKind,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<()> {
        self.record(
            "patch",
            RemoteCall::Patch(kind, id.to_string(), field.to_string(), value),
        )
    }
}

/// Yields fixed chunks, optionally followed by a stream error.
pub struct MockGenerator {
    chunks: Vec<String>,
    fail_after: bool,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerator {
    pub fn with_chunks(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail_after: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_after(chunks: &[&str]) -> Self {
        Self {
            fail_after: true,
            ..Self::with_chunks(chunks)
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream> {
        self.requests.lock().unwrap().push(request);
        let mut items: Vec<Result<String>> = self.chunks.iter().cloned().map(Ok).collect();
        if self.fail_after {
            items.push(Err(LoomError::remote(None, "stream reset")));
        }
        Ok(futures::stream::iter(items).boxed())
    }
}

/// Yields whatever is sent through its paired sender, ending when the
/// sender is dropped. Serves a single `generate` call.
pub struct ChannelGenerator {
    receiver: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
}

impl ChannelGenerator {
    pub fn new() -> (mpsc::UnboundedSender<String>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let generator = Self {
            receiver: Mutex::new(Some(receiver)),
        };
        (sender, generator)
    }
}

#[async_trait]
impl ContentGenerator for ChannelGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<ChunkStream> {
        let receiver = self
            .receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| LoomError::remote(None, "generator already consumed"))?;
        let stream = futures::stream::unfold(receiver, |mut receiver| async move {
            let chunk = receiver.recv().await?;
            Some((Ok::<_, LoomError>(chunk), receiver))
        });
        Ok(stream.boxed())
    }
}

pub struct StaticAuth(pub bool);

impl AuthProvider for StaticAuth {
    fn is_signed_in(&self) -> bool {
        self.0
    }

    fn user_id(&self) -> Option<String> {
        self.0.then(|| "user-1".to_string())
    }
}
