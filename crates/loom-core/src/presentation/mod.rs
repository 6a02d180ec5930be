//! Document presentation: mode model and the Presentation Mode Store.

mod model;
mod store;

pub use model::{
    BoundaryCrossing, BoundaryDirection, DocumentDraft, FullscreenAccess, ModeTransition, OnCross,
    OpenConfig, PresentationMode, PresentationState,
};
pub use store::PresentationStore;
