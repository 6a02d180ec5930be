//! Feature handler trait.

use async_trait::async_trait;

use super::model::{Intent, IntentTarget};

/// Fulfills one intent end to end for its module.
///
/// A handler owns its store slice, issues the remote calls that create the
/// underlying entity and navigates when its module lives elsewhere.
/// Handlers never call each other.
///
/// Errors are caught inside the handler and reported as `false`; side
/// effects already performed are not rolled back. Work launched in the
/// background may still be running when `handle` returns `true`.
#[async_trait]
pub trait FeatureHandler: Send + Sync {
    fn target(&self) -> IntentTarget;

    async fn handle(&self, intent: &Intent) -> bool;
}
