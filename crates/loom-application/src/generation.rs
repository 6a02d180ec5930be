//! Helpers for background (fire-and-forget) generation.

use futures::StreamExt;
use loom_core::error::Result;
use loom_core::ports::{ContentGenerator, GenerationRequest};

/// Log target of background generation outcomes.
pub const GENERATION_TARGET: &str = "loom::generation";

/// Runs `request` to completion, feeding each chunk to `on_chunk`, and
/// returns the concatenated text. Stops at the first stream error.
pub async fn stream_to_string<F>(
    generator: &dyn ContentGenerator,
    request: GenerationRequest,
    mut on_chunk: F,
) -> Result<String>
where
    F: FnMut(&str) + Send,
{
    let mut stream = generator.generate(request).await?;
    let mut content = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        on_chunk(&chunk);
        content.push_str(&chunk);
    }
    Ok(content)
}
