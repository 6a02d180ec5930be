//! Remote data layer interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

/// Kinds of entity the remote data layer stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Chat,
    Document,
    App,
}

impl EntityKind {
    /// Plural collection name, used in REST paths.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Chat => "chats",
            Self::Document => "documents",
            Self::App => "apps",
        }
    }
}

/// An entity as listed by the remote data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A chat message as appended to a chat entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            model_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            model_id: Some(model_id.into()),
            created_at: Utc::now(),
        }
    }
}

/// Request/response calls to the remote data layer.
///
/// Every call stands alone: there are no transactions spanning calls, and
/// a failure later in a sequence does not undo earlier calls.
#[async_trait]
pub trait RemoteDataLayer: Send + Sync {
    /// Creates an entity and returns its id. Each call creates a new entity.
    async fn create_entity(&self, kind: EntityKind, payload: serde_json::Value) -> Result<String>;

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>>;

    async fn append_message(&self, chat_id: &str, message: &ChatMessage) -> Result<()>;

    /// Sets one field of an existing entity.
    async fn patch_field(
        &self,
        kind: EntityKind,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<()>;
}
