// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON (de)serialization of composer timelines.
//!
//! The document format keeps plain interpolation kinds as bare strings;
//! bezier and spring payloads ride in optional sibling fields that default
//! away when absent. Every optional field has a documented default so a
//! sparse document imports cleanly; the only hard failures are unparseable
//! JSON and missing required fields.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::event::{Marker, Region};
use crate::keyframe::{InterpolationKind, Keyframe, SpringParams};
use crate::layer::{Layer, LayerTransform};
use crate::timeline::ComposerTimeline;
use crate::track::{Track, TrackKind};
use crate::value::Value;

fn default_true() -> bool {
    true
}

fn default_fps() -> f64 {
    30.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_interpolation() -> String {
    "linear".to_string()
}

fn default_track_kind() -> String {
    "property".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct TimelineDoc {
    duration: f64,
    #[serde(default = "default_fps")]
    fps: f64,
    #[serde(default)]
    layers: Vec<LayerDoc>,
    #[serde(default)]
    markers: Vec<Marker>,
    #[serde(default)]
    regions: Vec<Region>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LayerDoc {
    name: String,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    solo: bool,
    #[serde(default)]
    z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_layer: Option<String>,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default)]
    transform: LayerTransform,
    #[serde(default)]
    tracks: Vec<TrackDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrackDoc {
    name: String,
    #[serde(rename = "type", default = "default_track_kind")]
    kind: String,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    keyframes: IndexMap<String, Vec<KeyframeDoc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyframeDoc {
    time: f64,
    value: Value,
    #[serde(default = "default_interpolation")]
    interpolation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bezier: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spring: Option<SpringParams>,
}

impl KeyframeDoc {
    fn from_keyframe(keyframe: &Keyframe) -> Self {
        let (bezier, spring) = match keyframe.interpolation {
            InterpolationKind::CubicBezier { y1, y2 } => (Some([y1, y2]), None),
            InterpolationKind::Spring(params) => (None, Some(params)),
            _ => (None, None),
        };
        Self {
            time: keyframe.time,
            value: keyframe.value.clone(),
            interpolation: keyframe.interpolation.name().to_string(),
            bezier,
            spring,
        }
    }

    fn into_keyframe(self) -> Keyframe {
        let interpolation = match self.interpolation.as_str() {
            "linear" => InterpolationKind::Linear,
            "ease_in" => InterpolationKind::EaseIn,
            "ease_out" => InterpolationKind::EaseOut,
            "ease_in_out" => InterpolationKind::EaseInOut,
            "step" => InterpolationKind::Step,
            "cubic_bezier" => {
                let [y1, y2] = self.bezier.unwrap_or([0.0, 1.0]);
                InterpolationKind::CubicBezier { y1, y2 }
            }
            "spring" => InterpolationKind::Spring(self.spring.unwrap_or_default()),
            other => {
                tracing::warn!(kind = other, "unknown interpolation kind, using linear");
                InterpolationKind::Linear
            }
        };
        Keyframe {
            time: self.time,
            value: self.value,
            interpolation,
        }
    }
}

impl TimelineDoc {
    fn from_timeline(timeline: &ComposerTimeline) -> Self {
        let layers = timeline
            .layers()
            .iter()
            .map(|layer| LayerDoc {
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
                solo: layer.solo,
                z_index: layer.z_index,
                parent_layer: layer.parent_layer.clone(),
                opacity: layer.opacity,
                transform: layer.transform,
                tracks: layer
                    .tracks()
                    .iter()
                    .map(|track| TrackDoc {
                        name: track.name.clone(),
                        kind: track.kind.name().to_string(),
                        enabled: track.enabled,
                        keyframes: track
                            .properties()
                            .map(|property| {
                                let docs = track
                                    .keyframes(property)
                                    .unwrap_or_default()
                                    .iter()
                                    .map(KeyframeDoc::from_keyframe)
                                    .collect();
                                (property.to_string(), docs)
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            duration: timeline.duration(),
            fps: timeline.fps(),
            layers,
            markers: timeline.markers().to_vec(),
            regions: timeline.regions().to_vec(),
        }
    }

    fn into_timeline(self) -> ComposerTimeline {
        let mut timeline = ComposerTimeline::new(self.duration, self.fps);
        for layer_doc in self.layers {
            let mut layer = Layer::new(layer_doc.name).with_z_index(layer_doc.z_index);
            layer.visible = layer_doc.visible;
            layer.locked = layer_doc.locked;
            layer.solo = layer_doc.solo;
            layer.parent_layer = layer_doc.parent_layer;
            layer.opacity = layer_doc.opacity;
            layer.transform = layer_doc.transform;
            for track_doc in layer_doc.tracks {
                let mut track = Track::new(track_doc.name, TrackKind::parse(&track_doc.kind));
                track.enabled = track_doc.enabled;
                for (property, keyframe_docs) in track_doc.keyframes {
                    for doc in keyframe_docs {
                        track.add_keyframe(property.as_str(), doc.into_keyframe());
                    }
                }
                layer.add_track(track);
            }
            timeline.add_layer(layer);
        }
        for marker in self.markers {
            timeline.add_marker(marker);
        }
        for region in self.regions {
            timeline.add_region(region);
        }
        timeline
    }
}

impl ComposerTimeline {
    /// Serialize to the persisted JSON document format.
    pub fn export_to_json(&self) -> Result<String> {
        let doc = TimelineDoc::from_timeline(self);
        let json = serde_json::to_string_pretty(&doc)?;
        tracing::info!(
            layers = self.layers().len(),
            markers = self.markers().len(),
            "exported timeline"
        );
        Ok(json)
    }

    /// Parse a timeline from its JSON document format.
    ///
    /// Missing optional fields take their documented defaults; missing
    /// required fields (`duration`, layer `name`) and malformed JSON surface
    /// one descriptive error.
    pub fn import_from_json(json: &str) -> Result<Self> {
        let doc: TimelineDoc =
            serde_json::from_str(json).map_err(|e| TimelineError::Import(e.to_string()))?;
        let timeline = doc.into_timeline();
        tracing::info!(layers = timeline.layers().len(), "imported timeline");
        Ok(timeline)
    }

    /// Write the JSON document to a file.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.export_to_json()?)?;
        Ok(())
    }

    /// Read a timeline from a JSON document file.
    pub fn import_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::import_from_json(&json)
    }
}
