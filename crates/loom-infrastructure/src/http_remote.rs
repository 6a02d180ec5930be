//! HTTP implementation of the remote data layer and content generation.
//!
//! Talks JSON REST under a configured base URL:
//!
//! | Call | Request |
//! |---|---|
//! | `create_entity` | `POST {base}/{collection}` → `{"id": ...}` |
//! | `list_entities` | `GET {base}/{collection}` → `{"items": [...]}` |
//! | `append_message` | `POST {base}/chats/{id}/messages` |
//! | `patch_field` | `PATCH {base}/{collection}/{id}` with `{field: value}` |
//! | `generate` | `POST {base}/generate`, chunked UTF-8 text body |

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use loom_core::config::RemoteConfig;
use loom_core::error::{LoomError, Result};
use loom_core::ports::{
    ChatMessage, ChunkStream, ContentGenerator, EntityKind, EntityRecord, GenerationRequest,
    RemoteDataLayer,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying a user-supplied model credential.
const MODEL_API_KEY_HEADER: &str = "x-model-api-key";

#[derive(Clone)]
pub struct HttpRemoteDataLayer {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpRemoteDataLayer {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LoomError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| LoomError::remote(None, format!("Request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteDataLayer for HttpRemoteDataLayer {
    async fn create_entity(&self, kind: EntityKind, payload: serde_json::Value) -> Result<String> {
        let request = self
            .client
            .post(self.url(kind.collection()))
            .json(&CreateEntityRequest { payload });
        let created: CreateEntityResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|err| LoomError::remote(None, format!("Malformed create response: {err}")))?;
        tracing::debug!(%kind, entity_id = %created.id, "Entity created");
        Ok(created.id)
    }

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        let request = self.client.get(self.url(kind.collection()));
        let listed: ListEntitiesResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|err| LoomError::remote(None, format!("Malformed list response: {err}")))?;
        Ok(listed.items)
    }

    async fn append_message(&self, chat_id: &str, message: &ChatMessage) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("chats/{chat_id}/messages")))
            .json(message);
        self.send(request).await?;
        Ok(())
    }

    async fn patch_field(
        &self,
        kind: EntityKind,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<()> {
        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), value);
        let request = self
            .client
            .patch(self.url(&format!("{}/{id}", kind.collection())))
            .json(&body);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for HttpRemoteDataLayer {
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream> {
        let mut builder = self.client.post(self.url("generate")).json(&GenerateBody {
            prompt: &request.prompt,
            model: &request.model_id,
            instruction: request.instruction.as_deref(),
        });
        if let Some(api_key) = &request.api_key {
            builder = builder.header(MODEL_API_KEY_HEADER, api_key);
        }

        let response = self.send(builder).await?;
        let bytes = response.bytes_stream().map(|chunk| {
            chunk
                .map(|b| b.to_vec())
                .map_err(|err| LoomError::remote(None, format!("Stream interrupted: {err}")))
        });
        Ok(decode_utf8_chunks(bytes).boxed())
    }
}

/// Re-chunks a byte stream into strings without splitting characters.
pub(crate) fn decode_utf8_chunks<S>(bytes: S) -> impl Stream<Item = Result<String>> + Send
where
    S: Stream<Item = Result<Vec<u8>>> + Send + 'static,
{
    bytes
        .map(Some)
        .chain(futures::stream::once(futures::future::ready(None)))
        .scan(Vec::<u8>::new(), |pending, chunk| {
            let item = match chunk {
                Some(chunk) => chunk.map(|data| {
                    pending.extend_from_slice(&data);
                    take_valid_utf8(pending)
                }),
                // End of body: a truncated trailing character is replaced.
                None => Ok(String::from_utf8_lossy(&std::mem::take(pending)).into_owned()),
            };
            futures::future::ready(Some(item))
        })
        .filter(|item| futures::future::ready(!matches!(item, Ok(text) if text.is_empty())))
}

/// Removes and returns the longest decodable prefix of `pending`, leaving
/// an incomplete trailing character in place. Invalid bytes are replaced.
fn take_valid_utf8(pending: &mut Vec<u8>) -> String {
    match std::str::from_utf8(pending) {
        Ok(text) => {
            let text = text.to_string();
            pending.clear();
            text
        }
        Err(e) if e.error_len().is_none() => {
            let valid = e.valid_up_to();
            let rest = pending.split_off(valid);
            let text = String::from_utf8_lossy(pending).into_owned();
            *pending = rest;
            text
        }
        Err(_) => {
            let text = String::from_utf8_lossy(pending).into_owned();
            pending.clear();
            text
        }
    }
}

#[derive(Serialize)]
struct CreateEntityRequest {
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct CreateEntityResponse {
    id: String,
}

#[derive(Deserialize)]
struct ListEntitiesResponse {
    #[serde(default)]
    items: Vec<EntityRecord>,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    prompt: &'a str,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn map_http_error(status: StatusCode, body: String) -> LoomError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED => LoomError::Unauthenticated,
        StatusCode::NOT_FOUND => LoomError::remote(Some(status.as_u16()), format!("not found: {message}")),
        _ => LoomError::remote(Some(status.as_u16()), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(base_url: &str) -> HttpRemoteDataLayer {
        HttpRemoteDataLayer::new(&RemoteConfig {
            base_url: base_url.to_string(),
            ..RemoteConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let layer = layer("https://api.example.com/v1/");
        assert_eq!(layer.url("documents"), "https://api.example.com/v1/documents");
        assert_eq!(
            layer.url("/chats/c1/messages"),
            "https://api.example.com/v1/chats/c1/messages"
        );
    }

    #[test]
    fn test_error_body_message_is_extracted() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"title too long"}}"#.to_string(),
        );
        assert_eq!(err.to_string(), "Remote call failed (400): title too long");
    }

    #[test]
    fn test_plain_error_body_is_kept() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "Remote call failed (502): upstream down");
    }

    #[test]
    fn test_unauthorized_maps_to_unauthenticated() {
        let err = map_http_error(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(err, LoomError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_decoder_keeps_split_characters_whole() {
        // "é" is 0xC3 0xA9; split across two network chunks.
        let chunks = vec![Ok(b"caf\xC3".to_vec()), Ok(b"\xA9 ok".to_vec())];
        let decoded: Vec<String> = decode_utf8_chunks(futures::stream::iter(chunks))
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(decoded, vec!["caf".to_string(), "é ok".to_string()]);
    }

    #[tokio::test]
    async fn test_decoder_flushes_truncated_tail() {
        let chunks = vec![Ok(b"caf\xC3".to_vec())];
        let decoded: String = decode_utf8_chunks(futures::stream::iter(chunks))
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(decoded, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_decoder_forwards_errors() {
        let chunks = vec![Ok(b"partial".to_vec()), Err(LoomError::remote(None, "reset"))];
        let decoded: Vec<Result<String>> = decode_utf8_chunks(futures::stream::iter(chunks))
            .collect()
            .await;
        assert_eq!(decoded.len(), 2);
        assert!(decoded[1].is_err());
    }
}
