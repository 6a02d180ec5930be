//! Streaming content generation interface.

use std::fmt;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

/// Stream of generated text chunks.
pub type ChunkStream = BoxStream<'static, Result<String>>;

#[derive(Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model_id: String,
    /// User-supplied credential; forwarded, never logged.
    pub api_key: Option<String>,
    /// Optional instruction framing the prompt (e.g. "write a document").
    pub instruction: Option<String>,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("prompt", &self.prompt)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("instruction", &self.instruction)
            .finish()
    }
}

/// Produces content as a stream of chunks.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Starts a generation. Errors before the first chunk are returned
    /// directly; later failures arrive as stream items.
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream>;
}
