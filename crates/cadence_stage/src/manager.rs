// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bridges layer ordering to a live render-object list.

use cadence_timeline::ComposerTimeline;
use indexmap::IndexMap;

use crate::scene::{LayerState, ObjectHandle, SceneList};

/// Registration record for one tracked object.
#[derive(Debug, Clone)]
struct Registration {
    layer: String,
    tag: Option<String>,
}

/// Maintains the mapping from layers to render objects and re-applies paint
/// order and per-layer visual state whenever layer state changes.
///
/// Registration order within a layer is the paint order of that layer's
/// objects.
#[derive(Debug, Default)]
pub struct LayerManager {
    registered: IndexMap<ObjectHandle, Registration>,
}

impl LayerManager {
    /// Create a manager with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `handle` under `layer_name`.
    ///
    /// Returns false when the timeline has no layer with that name. An
    /// already-registered handle moves to the new layer and the back of its
    /// registration order.
    pub fn register_object(
        &mut self,
        timeline: &ComposerTimeline,
        layer_name: &str,
        handle: ObjectHandle,
        tag: Option<String>,
    ) -> bool {
        if timeline.get_layer(layer_name).is_none() {
            return false;
        }
        self.registered.shift_remove(&handle);
        self.registered.insert(
            handle,
            Registration {
                layer: layer_name.to_string(),
                tag,
            },
        );
        true
    }

    /// Stop tracking `handle`.
    pub fn unregister_object(&mut self, handle: ObjectHandle) -> bool {
        self.registered.shift_remove(&handle).is_some()
    }

    /// Re-register `handle` under `new_layer`, keeping its tag.
    ///
    /// Returns false when the target layer does not exist.
    pub fn move_object_to_layer(
        &mut self,
        timeline: &ComposerTimeline,
        handle: ObjectHandle,
        new_layer: &str,
    ) -> bool {
        if timeline.get_layer(new_layer).is_none() {
            return false;
        }
        let tag = self
            .registered
            .shift_remove(&handle)
            .and_then(|reg| reg.tag);
        self.register_object(timeline, new_layer, handle, tag)
    }

    /// Layer a handle is registered under, if any.
    pub fn layer_of(&self, handle: ObjectHandle) -> Option<&str> {
        self.registered.get(&handle).map(|reg| reg.layer.as_str())
    }

    /// Tag a handle was registered with, if any.
    pub fn tag_of(&self, handle: ObjectHandle) -> Option<&str> {
        self.registered.get(&handle)?.tag.as_deref()
    }

    /// Handles registered under `layer_name`, in registration order.
    pub fn objects_in_layer(&self, layer_name: &str) -> Vec<ObjectHandle> {
        self.registered
            .iter()
            .filter(|(_, reg)| reg.layer == layer_name)
            .map(|(handle, _)| *handle)
            .collect()
    }

    /// Number of tracked objects.
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Rebuild the scene's paint order from the timeline's layer order.
    ///
    /// Layers are walked in ascending z-index. When any layer is soloed the
    /// solo set alone is active, regardless of `visible`; otherwise
    /// `visible` gates each layer. Member objects of active layers receive
    /// the layer's opacity/transform. Objects the manager does not track
    /// keep their relative order at the end of the list, and the scene list
    /// is replaced in one step. Calling this twice with no registration
    /// change yields the same order.
    pub fn apply_layer_ordering(&self, timeline: &ComposerTimeline, scene: &mut dyn SceneList) {
        let solo_active = timeline.layers().iter().any(|l| l.solo);
        let mut ordered = Vec::with_capacity(self.registered.len());
        for layer in timeline.layers() {
            let active = if solo_active { layer.solo } else { layer.visible };
            if !active {
                continue;
            }
            let state = LayerState {
                opacity: layer.opacity,
                transform: layer.transform,
            };
            for (handle, reg) in &self.registered {
                if reg.layer == layer.name {
                    scene.apply_state(*handle, &state);
                    ordered.push(*handle);
                }
            }
        }
        for handle in scene.handles() {
            if !self.registered.contains_key(&handle) {
                ordered.push(handle);
            }
        }
        tracing::debug!(objects = ordered.len(), "applied layer ordering");
        scene.replace_all(ordered);
    }

    /// Set a layer's solo flag, then re-apply ordering.
    ///
    /// Returns false when the layer does not exist.
    pub fn solo_layer(
        &self,
        timeline: &mut ComposerTimeline,
        layer_name: &str,
        solo: bool,
        scene: &mut dyn SceneList,
    ) -> bool {
        let Some(layer) = timeline.get_layer_mut(layer_name) else {
            return false;
        };
        layer.solo = solo;
        self.apply_layer_ordering(timeline, scene);
        true
    }

    /// Hide a layer, then re-apply ordering.
    pub fn hide_layer(
        &self,
        timeline: &mut ComposerTimeline,
        layer_name: &str,
        scene: &mut dyn SceneList,
    ) -> bool {
        self.set_layer_visible(timeline, layer_name, false, scene)
    }

    /// Show a layer, then re-apply ordering.
    pub fn show_layer(
        &self,
        timeline: &mut ComposerTimeline,
        layer_name: &str,
        scene: &mut dyn SceneList,
    ) -> bool {
        self.set_layer_visible(timeline, layer_name, true, scene)
    }

    fn set_layer_visible(
        &self,
        timeline: &mut ComposerTimeline,
        layer_name: &str,
        visible: bool,
        scene: &mut dyn SceneList,
    ) -> bool {
        let Some(layer) = timeline.get_layer_mut(layer_name) else {
            return false;
        };
        layer.visible = visible;
        self.apply_layer_ordering(timeline, scene);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StageScene;
    use cadence_timeline::{Layer, LayerTransform};

    fn timeline_with_layers(zs: &[(&str, i64)]) -> ComposerTimeline {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        for &(name, z) in zs {
            timeline.add_layer(Layer::new(name).with_z_index(z));
        }
        timeline
    }

    #[test]
    fn test_register_requires_existing_layer() {
        let timeline = timeline_with_layers(&[("main", 0)]);
        let mut manager = LayerManager::new();
        assert!(manager.register_object(&timeline, "main", ObjectHandle::new(), None));
        assert!(!manager.register_object(&timeline, "ghost", ObjectHandle::new(), None));
        assert_eq!(manager.registered_count(), 1);
    }

    #[test]
    fn test_unregister() {
        let timeline = timeline_with_layers(&[("main", 0)]);
        let mut manager = LayerManager::new();
        let handle = ObjectHandle::new();
        manager.register_object(&timeline, "main", handle, Some("hero".to_string()));
        assert_eq!(manager.tag_of(handle), Some("hero"));
        assert!(manager.unregister_object(handle));
        assert!(!manager.unregister_object(handle));
    }

    #[test]
    fn test_ordering_walks_layers_ascending_z() {
        let timeline = timeline_with_layers(&[("front", 10), ("back", 0)]);
        let mut manager = LayerManager::new();
        let front_obj = ObjectHandle::new();
        let back_obj = ObjectHandle::new();
        // Registered front-first; layer z order must still win.
        manager.register_object(&timeline, "front", front_obj, None);
        manager.register_object(&timeline, "back", back_obj, None);

        let mut scene = StageScene::new();
        scene.add(front_obj);
        scene.add(back_obj);
        manager.apply_layer_ordering(&timeline, &mut scene);
        assert_eq!(scene.handles(), vec![back_obj, front_obj]);
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let timeline = timeline_with_layers(&[("a", 0), ("b", 10)]);
        let mut manager = LayerManager::new();
        let x = ObjectHandle::new();
        let y = ObjectHandle::new();
        manager.register_object(&timeline, "b", x, None);
        manager.register_object(&timeline, "a", y, None);

        let mut scene = StageScene::new();
        scene.add(x);
        scene.add(y);
        manager.apply_layer_ordering(&timeline, &mut scene);
        let first = scene.handles();
        manager.apply_layer_ordering(&timeline, &mut scene);
        assert_eq!(scene.handles(), first);
    }

    #[test]
    fn test_untracked_objects_keep_relative_order_at_end() {
        let timeline = timeline_with_layers(&[("main", 0)]);
        let mut manager = LayerManager::new();
        let tracked = ObjectHandle::new();
        let loose_one = ObjectHandle::new();
        let loose_two = ObjectHandle::new();
        manager.register_object(&timeline, "main", tracked, None);

        let mut scene = StageScene::new();
        scene.add(loose_one);
        scene.add(tracked);
        scene.add(loose_two);
        manager.apply_layer_ordering(&timeline, &mut scene);
        assert_eq!(scene.handles(), vec![tracked, loose_one, loose_two]);
    }

    #[test]
    fn test_hidden_layer_objects_leave_the_scene() {
        let mut timeline = timeline_with_layers(&[("main", 0)]);
        let mut manager = LayerManager::new();
        let handle = ObjectHandle::new();
        manager.register_object(&timeline, "main", handle, None);

        let mut scene = StageScene::new();
        scene.add(handle);
        assert!(manager.hide_layer(&mut timeline, "main", &mut scene));
        assert!(scene.handles().is_empty());
        assert!(manager.show_layer(&mut timeline, "main", &mut scene));
        assert_eq!(scene.handles(), vec![handle]);
    }

    #[test]
    fn test_solo_overrides_visible() {
        let mut timeline = timeline_with_layers(&[("a", 0), ("b", 10)]);
        // `b` is hidden but soloed; `a` is visible but not in the solo set.
        timeline.get_layer_mut("b").unwrap().visible = false;
        let mut manager = LayerManager::new();
        let on_a = ObjectHandle::new();
        let on_b = ObjectHandle::new();
        manager.register_object(&timeline, "a", on_a, None);
        manager.register_object(&timeline, "b", on_b, None);

        let mut scene = StageScene::new();
        scene.add(on_a);
        scene.add(on_b);
        assert!(manager.solo_layer(&mut timeline, "b", true, &mut scene));
        assert_eq!(scene.handles(), vec![on_b]);

        assert!(manager.solo_layer(&mut timeline, "b", false, &mut scene));
        assert_eq!(scene.handles(), vec![on_a]);
    }

    #[test]
    fn test_layer_state_is_applied_to_members() {
        let mut timeline = timeline_with_layers(&[("main", 0)]);
        {
            let layer = timeline.get_layer_mut("main").unwrap();
            layer.opacity = 0.5;
            layer.transform = LayerTransform {
                x: 3.0,
                ..LayerTransform::default()
            };
        }
        let mut manager = LayerManager::new();
        let handle = ObjectHandle::new();
        manager.register_object(&timeline, "main", handle, None);

        let mut scene = StageScene::new();
        manager.apply_layer_ordering(&timeline, &mut scene);
        let state = scene.state(handle).unwrap();
        assert_eq!(state.opacity, 0.5);
        assert_eq!(state.transform.x, 3.0);
    }

    #[test]
    fn test_move_object_between_layers() {
        let timeline = timeline_with_layers(&[("a", 0), ("b", 10)]);
        let mut manager = LayerManager::new();
        let handle = ObjectHandle::new();
        manager.register_object(&timeline, "a", handle, Some("prop".to_string()));
        assert!(manager.move_object_to_layer(&timeline, handle, "b"));
        assert_eq!(manager.layer_of(handle), Some("b"));
        assert_eq!(manager.tag_of(handle), Some("prop"));
        assert!(!manager.move_object_to_layer(&timeline, handle, "ghost"));
        // A failed move leaves the registration untouched.
        assert_eq!(manager.layer_of(handle), Some("b"));
    }

    #[test]
    fn test_reorder_reflects_after_z_change() {
        let mut timeline = timeline_with_layers(&[("a", 0), ("b", 10)]);
        let mut manager = LayerManager::new();
        let on_a = ObjectHandle::new();
        let on_b = ObjectHandle::new();
        manager.register_object(&timeline, "a", on_a, None);
        manager.register_object(&timeline, "b", on_b, None);

        let mut scene = StageScene::new();
        manager.apply_layer_ordering(&timeline, &mut scene);
        assert_eq!(scene.handles(), vec![on_a, on_b]);

        timeline.move_layer_to_top("a");
        manager.apply_layer_ordering(&timeline, &mut scene);
        assert_eq!(scene.handles(), vec![on_b, on_a]);
    }
}
