//! Intents and the feature handler interface.

mod handler;
mod model;

pub use handler::FeatureHandler;
pub use model::{Intent, IntentFlags, IntentInput, IntentTarget};
