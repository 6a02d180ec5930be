//! Intent dispatch.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use loom_core::intent::{FeatureHandler, Intent, IntentInput, IntentTarget};
use tracing::Instrument;

/// Routes an intent to exactly one registered handler.
///
/// The registry is fixed once built. Dispatch neither queues nor
/// de-duplicates: concurrent dispatches run concurrently.
pub struct IntentRouter {
    handlers: HashMap<IntentTarget, Arc<dyn FeatureHandler>>,
}

impl IntentRouter {
    pub fn builder() -> IntentRouterBuilder {
        IntentRouterBuilder::default()
    }

    /// Registered targets, in declaration order.
    pub fn targets(&self) -> Vec<IntentTarget> {
        use strum::IntoEnumIterator;
        IntentTarget::iter()
            .filter(|target| self.handlers.contains_key(target))
            .collect()
    }

    /// Invokes the handler registered for `intent.target`.
    ///
    /// Returns false, without touching any state, when the name is unknown
    /// or has no handler; otherwise returns the handler's outcome.
    pub async fn dispatch(&self, intent: &Intent) -> bool {
        let Some(handler) = self.lookup(&intent.target) else {
            tracing::warn!(intent = %intent.target, "No handler registered for intent");
            return false;
        };

        let span = tracing::info_span!("dispatch", intent = %intent.target);
        let fulfilled = handler.handle(intent).instrument(span).await;
        if fulfilled {
            tracing::info!(intent = %intent.target, "Intent fulfilled");
        } else {
            tracing::warn!(intent = %intent.target, "Intent handler reported failure");
        }
        fulfilled
    }

    /// Builds the intent from its parts and dispatches it.
    pub async fn dispatch_named(&self, name: &str, summary: &str, input: IntentInput) -> bool {
        self.dispatch(&Intent::new(name, summary, input)).await
    }

    fn lookup(&self, name: &str) -> Option<&Arc<dyn FeatureHandler>> {
        let target = IntentTarget::from_str(name.trim()).ok()?;
        self.handlers.get(&target)
    }
}

#[derive(Default)]
pub struct IntentRouterBuilder {
    handlers: HashMap<IntentTarget, Arc<dyn FeatureHandler>>,
}

impl IntentRouterBuilder {
    /// Registers `handler` under its own target. A later registration for
    /// the same target replaces the earlier one.
    pub fn register(mut self, handler: Arc<dyn FeatureHandler>) -> Self {
        let target = handler.target();
        if self.handlers.insert(target, handler).is_some() {
            tracing::warn!(intent = %target, "Replacing previously registered handler");
        }
        self
    }

    pub fn build(self) -> IntentRouter {
        IntentRouter {
            handlers: self.handlers,
        }
    }
}
