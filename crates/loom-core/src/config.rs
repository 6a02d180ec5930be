//! User configuration model (`config.toml`).

use serde::{Deserialize, Serialize};

/// Root of `config.toml`. Every field has a default, so a missing or
/// partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoomConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Model used when the user does not pick one.
    pub default_model: String,
    pub remote: RemoteConfig,
    pub auth: AuthConfig,
    pub routes: RouteConfig,
}

impl Default for LoomConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_model: "default".to_string(),
            remote: RemoteConfig::default(),
            auth: AuthConfig::default(),
            routes: RouteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787/api".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

/// Signed in iff `user_id` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Where illegitimate full-screen visits are redirected.
    pub home: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: LoomConfig = toml::from_str(
            r#"
            [auth]
            user_id = "u-1"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.user_id.as_deref(), Some("u-1"));
        assert_eq!(config.routes.home, "/");
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_round_trip_omits_absent_token() {
        let rendered = toml::to_string_pretty(&LoomConfig::default()).unwrap();
        assert!(!rendered.contains("api_token"));
    }
}
