//! Scene descriptor types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::presentation::PresentationMode;

/// Identifier of one live scene instance.
///
/// Scenes that can be instantiated several times (one editor per document)
/// must mint a fresh id per instance with [`SceneId::mint`]; singleton
/// scenes use a fixed name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(String);

impl SceneId {
    /// Mints a unique id for a new instance of `kind`.
    pub fn mint(kind: &SceneKind) -> Self {
        Self(format!("{}-{}", kind, Uuid::new_v4()))
    }

    /// Uses `name` verbatim, for scenes that exist at most once.
    pub fn fixed(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Coarse scene category. Carried for extensibility only; never used for
/// ordering or priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SceneKind {
    Home,
    Chat,
    Document,
    AppFactory,
    #[strum(default)]
    Other(String),
}

/// Where the assistant activator renders when the scene enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivatorPlacement {
    /// Rendered by the application shell.
    Global,
    /// Rendered inside the scene itself (drawers, overlays).
    Local,
    None,
}

/// What a click on the activator does for the owning scene.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivatorAction {
    /// Show the assistant conversation panel.
    #[default]
    OpenPanel,
    TogglePanel,
    /// Change the document presentation mode, then optionally navigate.
    SwitchPresentation {
        mode: PresentationMode,
        navigate_to: Option<String>,
    },
    Navigate { path: String },
}

/// One active UI scope and its activator preferences.
///
/// A descriptor is owned by the scene that pushed it. Replacing it means
/// pushing a descriptor with the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub id: SceneId,
    pub kind: SceneKind,
    pub activator_enabled: bool,
    pub activator_placement: ActivatorPlacement,
    #[serde(default)]
    pub on_activator: ActivatorAction,
    /// Scene-specific hints, opaque to the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl SceneDescriptor {
    /// Creates an enabled descriptor with the default "open panel" action.
    pub fn new(id: SceneId, kind: SceneKind, placement: ActivatorPlacement) -> Self {
        Self {
            id,
            kind,
            activator_enabled: true,
            activator_placement: placement,
            on_activator: ActivatorAction::OpenPanel,
            metadata: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.activator_enabled = enabled;
        self
    }

    pub fn with_action(mut self, action: ActivatorAction) -> Self {
        self.on_activator = action;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// True when this descriptor outranks global ones during resolution.
    pub fn is_local_enabled(&self) -> bool {
        self.activator_enabled && self.activator_placement == ActivatorPlacement::Local
    }
}
