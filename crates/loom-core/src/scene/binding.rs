//! Scoped registration of a scene with the Context Stack.

use std::sync::Arc;

use super::descriptor::{SceneDescriptor, SceneId};
use super::stack::ContextStack;

/// Guard tying a descriptor's presence in the stack to the owning scene.
///
/// Created by [`ContextStack::bind`]. The descriptor is popped exactly once:
/// on [`SceneBinding::release`] or when the guard is dropped, whichever
/// comes first. Unwinding and early returns drop the guard too.
#[must_use = "dropping the binding unregisters the scene immediately"]
pub struct SceneBinding {
    stack: Arc<ContextStack>,
    id: SceneId,
    released: bool,
}

impl ContextStack {
    /// Pushes `descriptor` and returns the guard that will pop it.
    pub fn bind(self: &Arc<Self>, descriptor: SceneDescriptor) -> SceneBinding {
        let id = descriptor.id.clone();
        self.push(descriptor);
        SceneBinding {
            stack: Arc::clone(self),
            id,
            released: false,
        }
    }
}

impl SceneBinding {
    pub fn id(&self) -> &SceneId {
        &self.id
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Re-registers after the scene's descriptor changed.
    ///
    /// A new id releases the old registration and acquires a new one (a
    /// display-mode change inside a scene is a remount). The same id updates
    /// the stored fields in place without a release, keeping the entry's
    /// mount position. A released binding is reacquired.
    pub fn rebind(&mut self, descriptor: SceneDescriptor) {
        if self.released || descriptor.id != self.id {
            self.release_inner();
            self.id = descriptor.id.clone();
            self.stack.push(descriptor);
            self.released = false;
            return;
        }

        if !self.stack.replace_in_place(descriptor.clone()) {
            // Superseded or popped elsewhere; restore our registration.
            self.stack.push(descriptor);
        }
    }

    /// Pops the descriptor now instead of at drop.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.stack.pop(&self.id);
        }
    }
}

impl Drop for SceneBinding {
    fn drop(&mut self) {
        self.release_inner();
    }
}
