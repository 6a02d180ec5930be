//! Intent types.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Names of the feature modules an intent can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IntentTarget {
    Chat,
    Document,
    AppFactory,
}

/// Flags the user set alongside the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntentFlags {
    pub web_search: bool,
    pub deep_think: bool,
}

/// Raw user input accompanying an intent.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentInput {
    pub prompt: String,
    pub model_id: String,
    /// User-supplied credential for the generation backend.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub flags: IntentFlags,
}

impl fmt::Debug for IntentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentInput")
            .field("prompt", &self.prompt)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("flags", &self.flags)
            .finish()
    }
}

impl IntentInput {
    pub fn new(prompt: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: model_id.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_flags(mut self, flags: IntentFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A classified user goal, as produced upstream of the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Short summary produced by the classifier, used for titles.
    pub summary: String,
    /// Name of the target module, e.g. `"chat"`.
    pub target: String,
    pub input: IntentInput,
}

impl Intent {
    pub fn new(target: impl Into<String>, summary: impl Into<String>, input: IntentInput) -> Self {
        Self {
            summary: summary.into(),
            target: target.into(),
            input,
        }
    }

    /// Summary if present, otherwise the start of the prompt.
    pub fn title(&self) -> String {
        let summary = self.summary.trim();
        if !summary.is_empty() {
            return summary.to_string();
        }
        let prompt = self.input.prompt.trim();
        match prompt.char_indices().nth(60) {
            Some((cut, _)) => format!("{}…", &prompt[..cut]),
            None => prompt.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_target_names() {
        assert_eq!(IntentTarget::from_str("app_factory").unwrap(), IntentTarget::AppFactory);
        assert_eq!(IntentTarget::Document.to_string(), "document");
        assert!(IntentTarget::from_str("spreadsheet").is_err());
    }

    #[test]
    fn test_title_prefers_summary() {
        let intent = Intent::new("chat", "  Trip ideas ", IntentInput::new("plan a trip", "m"));
        assert_eq!(intent.title(), "Trip ideas");
    }

    #[test]
    fn test_title_truncates_long_prompt() {
        let prompt = "x".repeat(100);
        let intent = Intent::new("chat", "", IntentInput::new(prompt, "m"));
        assert_eq!(intent.title().chars().count(), 61);
    }

    #[test]
    fn test_api_key_is_not_serialized_or_debugged() {
        let input = IntentInput::new("hi", "m").with_api_key("sk-live");
        let json = serde_json::to_string(&input).unwrap();
        assert!(!json.contains("sk-live"));
        assert!(!format!("{:?}", input).contains("sk-live"));
    }
}
