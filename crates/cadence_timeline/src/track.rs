// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions: named channels of per-property keyframes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::keyframe::Keyframe;
use crate::value::Value;

/// Role of a track within its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Generic property animation
    #[default]
    Property,
    /// Transform (position, rotation, scale)
    Transform,
    /// Audio playback
    Audio,
    /// Event triggers
    Event,
    /// Camera settings
    Camera,
    /// Anything else
    Custom,
}

impl TrackKind {
    /// Wire name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Transform => "transform",
            Self::Audio => "audio",
            Self::Event => "event",
            Self::Camera => "camera",
            Self::Custom => "custom",
        }
    }

    /// Parse a wire name; unknown names map to `Custom`.
    pub fn parse(name: &str) -> Self {
        match name {
            "property" => Self::Property,
            "transform" => Self::Transform,
            "audio" => Self::Audio,
            "event" => Self::Event,
            "camera" => Self::Camera,
            _ => Self::Custom,
        }
    }
}

/// A named channel holding the keyframe history for one or more properties.
#[derive(Debug, Clone)]
pub struct Track {
    /// Track name, unique within its layer
    pub name: String,
    /// Track role
    pub kind: TrackKind,
    /// Disabled tracks are skipped when sampling through their layer
    pub enabled: bool,
    keyframes: IndexMap<String, Vec<Keyframe>>,
}

impl Track {
    /// Create an empty, enabled track.
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enabled: true,
            keyframes: IndexMap::new(),
        }
    }

    /// Append a keyframe to `property` and restore time order.
    ///
    /// The sort is stable, so keyframes sharing a timestamp keep insertion
    /// order and the last-inserted one wins during sampling.
    pub fn add_keyframe(&mut self, property: impl Into<String>, keyframe: Keyframe) {
        let keys = self.keyframes.entry(property.into()).or_default();
        keys.push(keyframe);
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Remove the keyframe at `index` within `property`.
    pub fn remove_keyframe(&mut self, property: &str, index: usize) -> Option<Keyframe> {
        let keys = self.keyframes.get_mut(property)?;
        if index >= keys.len() {
            return None;
        }
        Some(keys.remove(index))
    }

    /// Sample `property` at `time`.
    ///
    /// Returns `None` when the property has no keyframes. Queries before the
    /// first keyframe return its value; queries after the last hold the last
    /// value. Out-of-range queries are defined behavior, not an error.
    pub fn get_value_at_time(&self, property: &str, time: f64) -> Option<Value> {
        let keys = self.keyframes.get(property)?;
        if keys.is_empty() {
            return None;
        }
        let idx = keys.partition_point(|k| k.time <= time);
        if idx == 0 {
            return Some(keys[0].value.clone());
        }
        let prev = &keys[idx - 1];
        match keys.get(idx) {
            None => Some(prev.value.clone()),
            Some(next) => Some(prev.interpolate_to(next, time)),
        }
    }

    /// Keyframes of `property` in time order.
    pub fn keyframes(&self, property: &str) -> Option<&[Keyframe]> {
        self.keyframes.get(property).map(Vec::as_slice)
    }

    /// Property names in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.keyframes.keys().map(String::as_str)
    }

    /// Total keyframe count across all properties.
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.values().map(Vec::len).sum()
    }

    /// Time of the last keyframe across all properties.
    pub fn duration(&self) -> f64 {
        self.keyframes
            .values()
            .filter_map(|keys| keys.last())
            .map(|k| k.time)
            .fold(0.0, f64::max)
    }

    /// Keyframes of `property` with `start <= time <= end`.
    pub fn keyframes_in_range(&self, property: &str, start: f64, end: f64) -> Vec<&Keyframe> {
        self.keyframes
            .get(property)
            .map(|keys| {
                keys.iter()
                    .filter(|k| k.time >= start && k.time <= end)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Shift every keyframe by `delta`, clamping at time zero.
    pub fn offset_time(&mut self, delta: f64) {
        for keys in self.keyframes.values_mut() {
            for k in keys.iter_mut() {
                k.time = (k.time + delta).max(0.0);
            }
            keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
    }

    /// Scale every keyframe time by `factor`.
    pub fn scale_time(&mut self, factor: f64) {
        for keys in self.keyframes.values_mut() {
            for k in keys.iter_mut() {
                k.time *= factor;
            }
            keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
    }
}
