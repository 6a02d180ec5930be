//! The Context Stack: an ordered set of scene descriptors keyed by id.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

use super::descriptor::{SceneDescriptor, SceneId};

/// Ordered registry of the currently mounted scenes.
///
/// Insertion order is mount order. Pushing an id that is already present
/// evicts the old entry first, so the stack never holds two descriptors
/// with the same id. Popping removes an id wherever it sits.
///
/// All operations are synchronous and total. Every effective mutation bumps
/// a revision counter that subscribers can watch.
pub struct ContextStack {
    entries: RwLock<Vec<SceneDescriptor>>,
    revision: watch::Sender<u64>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: RwLock::new(Vec::new()),
            revision,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<SceneDescriptor>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<SceneDescriptor>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Removes any entry with the same id, then appends `descriptor`.
    pub fn push(&self, descriptor: SceneDescriptor) {
        {
            let mut entries = self.write();
            let before = entries.len();
            entries.retain(|entry| entry.id != descriptor.id);
            if entries.len() != before {
                tracing::debug!(scene_id = %descriptor.id, "Evicting superseded scene descriptor");
            }
            tracing::debug!(scene_id = %descriptor.id, kind = %descriptor.kind, "Scene pushed");
            entries.push(descriptor);
        }
        self.bump();
    }

    /// Removes the entry with `id`. Absent ids are a silent no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn pop(&self, id: &SceneId) -> bool {
        let removed = {
            let mut entries = self.write();
            let before = entries.len();
            entries.retain(|entry| &entry.id != id);
            entries.len() != before
        };
        if removed {
            tracing::debug!(scene_id = %id, "Scene popped");
            self.bump();
        }
        removed
    }

    /// Replaces the entry with the same id without moving it.
    ///
    /// Returns false (and changes nothing) when the id is not present.
    pub fn replace_in_place(&self, descriptor: SceneDescriptor) -> bool {
        let replaced = {
            let mut entries = self.write();
            match entries.iter_mut().find(|entry| entry.id == descriptor.id) {
                Some(slot) if *slot == descriptor => return true,
                Some(slot) => {
                    *slot = descriptor;
                    true
                }
                None => false,
            }
        };
        if replaced {
            self.bump();
        }
        replaced
    }

    /// The Active Context, see [`active_context`].
    pub fn peek_active(&self) -> Option<SceneDescriptor> {
        active_context(&self.read()).cloned()
    }

    pub fn get(&self, id: &SceneId) -> Option<SceneDescriptor> {
        self.read().iter().find(|entry| &entry.id == id).cloned()
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.read().iter().any(|entry| &entry.id == id)
    }

    /// Copy of the entries in mount order.
    pub fn snapshot(&self) -> Vec<SceneDescriptor> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Receiver that observes a new revision after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

/// Resolves the Active Context of `entries` (mount order).
///
/// Scanning newest to oldest, the first enabled descriptor with local
/// placement wins regardless of when global descriptors were pushed.
/// Without one, the newest descriptor overall is returned, whatever its
/// placement.
pub fn active_context(entries: &[SceneDescriptor]) -> Option<&SceneDescriptor> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.is_local_enabled())
        .or_else(|| entries.last())
}
