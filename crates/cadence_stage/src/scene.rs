// SPDX-License-Identifier: MIT OR Apache-2.0
//! The render-object list collaborator contract.

use cadence_timeline::LayerTransform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle to a render object owned by the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub Uuid);

impl ObjectHandle {
    /// Create a new random object handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-layer visual state pushed onto member objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerState {
    /// Layer opacity in `[0, 1]`
    pub opacity: f64,
    /// Layer transform
    pub transform: LayerTransform,
}

/// An ordered, mutable list of render objects.
///
/// List order is paint order. `replace_all` swaps the entire list in one
/// step so consumers never observe a partially reordered scene.
pub trait SceneList {
    /// Current object handles in paint order.
    fn handles(&self) -> Vec<ObjectHandle>;

    /// Replace the full list in one step.
    fn replace_all(&mut self, handles: Vec<ObjectHandle>);

    /// Push a layer's visual state onto one member object.
    fn apply_state(&mut self, handle: ObjectHandle, state: &LayerState);
}

/// In-memory scene list, used by hosts without a live renderer and by tests.
#[derive(Debug, Default)]
pub struct StageScene {
    order: Vec<ObjectHandle>,
    states: IndexMap<ObjectHandle, LayerState>,
}

impl StageScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object at the end of the paint order.
    pub fn add(&mut self, handle: ObjectHandle) {
        if !self.order.contains(&handle) {
            self.order.push(handle);
        }
    }

    /// Remove an object by handle.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let before = self.order.len();
        self.order.retain(|h| *h != handle);
        self.states.shift_remove(&handle);
        before != self.order.len()
    }

    /// Visual state last applied to an object, if any.
    pub fn state(&self, handle: ObjectHandle) -> Option<&LayerState> {
        self.states.get(&handle)
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl SceneList for StageScene {
    fn handles(&self) -> Vec<ObjectHandle> {
        self.order.clone()
    }

    fn replace_all(&mut self, handles: Vec<ObjectHandle>) {
        self.order = handles;
    }

    fn apply_state(&mut self, handle: ObjectHandle, state: &LayerState) {
        self.states.insert(handle, *state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut scene = StageScene::new();
        let handle = ObjectHandle::new();
        scene.add(handle);
        scene.add(handle);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_by_handle() {
        let mut scene = StageScene::new();
        let a = ObjectHandle::new();
        let b = ObjectHandle::new();
        scene.add(a);
        scene.add(b);
        assert!(scene.remove(a));
        assert!(!scene.remove(a));
        assert_eq!(scene.handles(), vec![b]);
    }

    #[test]
    fn test_replace_all_swaps_order() {
        let mut scene = StageScene::new();
        let a = ObjectHandle::new();
        let b = ObjectHandle::new();
        scene.add(a);
        scene.add(b);
        scene.replace_all(vec![b, a]);
        assert_eq!(scene.handles(), vec![b, a]);
    }
}
