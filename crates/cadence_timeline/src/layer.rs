// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer definitions: z-ordered groups of tracks.

use serde::{Deserialize, Serialize};

use crate::track::Track;
use crate::value::Value;

/// Affine transform shared by a layer's member objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
    /// Uniform scale
    pub scale: f64,
    /// Rotation in radians
    pub rotation: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl LayerTransform {
    /// Whether this transform leaves objects untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// A named, ordered collection of tracks with a paint-order key.
///
/// Layers owned by a timeline are kept in ascending `z_index` order; change
/// z through the timeline's ordering helpers so the order is re-established
/// before the next read.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name, unique within its timeline
    pub name: String,
    /// Hidden layers are skipped when applying paint order
    pub visible: bool,
    /// Locked layers reject edits in host tooling; the engine only stores it
    pub locked: bool,
    /// When any layer is soloed, the solo set alone is active
    pub solo: bool,
    /// Paint-order key; higher paints over lower
    pub z_index: i64,
    /// Optional parent layer name
    pub parent_layer: Option<String>,
    /// Opacity applied to member objects, in `[0, 1]`
    pub opacity: f64,
    /// Transform applied to member objects
    pub transform: LayerTransform,
    tracks: Vec<Track>,
}

impl Layer {
    /// Create a visible, unlocked layer at z-index 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            locked: false,
            solo: false,
            z_index: 0,
            parent_layer: None,
            opacity: 1.0,
            transform: LayerTransform::default(),
            tracks: Vec::new(),
        }
    }

    /// Set the paint-order key.
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the parent layer name.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_layer = Some(parent.into());
        self
    }

    /// Add a track.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Get a track by name.
    pub fn get_track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Get a mutable track by name.
    pub fn get_track_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    /// Remove a track by name.
    pub fn remove_track(&mut self, name: &str) -> Option<Track> {
        let idx = self.tracks.iter().position(|t| t.name == name)?;
        Some(self.tracks.remove(idx))
    }

    /// All tracks in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track names in insertion order.
    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Sample `track/property` at `time`; disabled tracks yield `None`.
    pub fn sample(&self, track: &str, property: &str, time: f64) -> Option<Value> {
        let track = self.get_track(track)?;
        if !track.enabled {
            return None;
        }
        track.get_value_at_time(property, time)
    }
}
