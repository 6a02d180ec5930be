//! Configuration-backed authentication state.

use loom_core::config::AuthConfig;
use loom_core::ports::AuthProvider;

/// Signed in iff the configuration names a user.
#[derive(Debug, Clone, Default)]
pub struct ConfigAuthProvider {
    user_id: Option<String>,
}

impl ConfigAuthProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            user_id: config
                .user_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

impl AuthProvider for ConfigAuthProvider {
    fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
