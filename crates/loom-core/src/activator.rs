//! Activator Resolver: where (if anywhere) the assistant activator renders.

use std::sync::Arc;

use crate::panel::PanelVisibility;
use crate::scene::{
    ActivatorAction, ActivatorPlacement, ContextStack, SceneDescriptor, SceneId, active_context,
};

/// Why no activator is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenReason {
    NoScenes,
    /// An open panel suppresses every activator.
    PanelOpen,
    Disabled,
    PlacementNone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivatorDecision {
    Hidden(HiddenReason),
    Visible {
        scene_id: SceneId,
        placement: ActivatorPlacement,
    },
}

impl ActivatorDecision {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// True when the scene `id` should render the activator.
    pub fn renders_for(&self, id: &SceneId) -> bool {
        matches!(self, Self::Visible { scene_id, .. } if scene_id == id)
    }
}

/// Pure resolution over stack entries (mount order) and panel visibility.
pub fn resolve(entries: &[SceneDescriptor], panel_visible: bool) -> ActivatorDecision {
    let Some(active) = active_context(entries) else {
        return ActivatorDecision::Hidden(HiddenReason::NoScenes);
    };
    if panel_visible {
        return ActivatorDecision::Hidden(HiddenReason::PanelOpen);
    }
    if !active.activator_enabled {
        return ActivatorDecision::Hidden(HiddenReason::Disabled);
    }
    if active.activator_placement == ActivatorPlacement::None {
        return ActivatorDecision::Hidden(HiddenReason::PlacementNone);
    }
    ActivatorDecision::Visible {
        scene_id: active.id.clone(),
        placement: active.activator_placement,
    }
}

/// Reads the live stack and panel to answer activator questions.
#[derive(Clone)]
pub struct ActivatorResolver {
    stack: Arc<ContextStack>,
    panel: Arc<PanelVisibility>,
}

impl ActivatorResolver {
    pub fn new(stack: Arc<ContextStack>, panel: Arc<PanelVisibility>) -> Self {
        Self { stack, panel }
    }

    pub fn resolve(&self) -> ActivatorDecision {
        resolve(&self.stack.snapshot(), self.panel.is_visible())
    }

    pub fn should_render(&self, scene_id: &SceneId) -> bool {
        self.resolve().renders_for(scene_id)
    }

    /// The action a click on `scene_id`'s activator triggers.
    ///
    /// `None` when that scene does not currently own a visible activator,
    /// e.g. a click racing a context switch.
    pub fn interaction(&self, scene_id: &SceneId) -> Option<ActivatorAction> {
        let entries = self.stack.snapshot();
        if !resolve(&entries, self.panel.is_visible()).renders_for(scene_id) {
            tracing::debug!(%scene_id, "Ignoring activator interaction from non-owning scene");
            return None;
        }
        active_context(&entries).map(|owner| owner.on_activator.clone())
    }
}
