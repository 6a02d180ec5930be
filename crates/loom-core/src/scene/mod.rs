//! Scene registration: descriptors, the Context Stack and scoped bindings.
//!
//! - `descriptor`: `SceneDescriptor`, `SceneId`, `ActivatorPlacement`, `ActivatorAction`
//! - `stack`: `ContextStack` and Active Context resolution
//! - `binding`: `SceneBinding`, the guard returned by `ContextStack::bind`

mod binding;
mod descriptor;
mod stack;

pub use binding::SceneBinding;
pub use descriptor::{ActivatorAction, ActivatorPlacement, SceneDescriptor, SceneId, SceneKind};
pub use stack::{ContextStack, active_context};
