// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scheduled events and time-axis annotations.
//!
//! Events carry serializable [`EventCommand`] payloads rather than closures;
//! the driving context implements [`CommandSink`] and interprets them, which
//! keeps the timeline decoupled from the render surface and testable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Unique identifier for a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new random event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable command payload carried by a timeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCommand {
    /// Command discriminator understood by the driving context
    pub kind: String,
    /// Free-form parameters
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub params: JsonValue,
}

impl EventCommand {
    /// Create a command with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: JsonValue::Null,
        }
    }

    /// Attach parameters.
    pub fn with_params(mut self, params: JsonValue) -> Self {
        self.params = params;
        self
    }
}

/// Error returned by a driving context when a command fails.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The driving context does not understand the command kind
    #[error("unknown command kind: {0}")]
    UnknownKind(String),

    /// The command was understood but failed to execute
    #[error("command failed: {0}")]
    Failed(String),
}

/// Receiver for commands fired by the timeline.
pub trait CommandSink {
    /// Execute one due event's command.
    fn dispatch(&mut self, event: &TimelineEvent) -> Result<(), CommandError>;
}

/// A one-shot command scheduled at a point on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Unique event ID
    #[serde(default)]
    pub id: EventId,
    /// Fire time in seconds
    pub time: f64,
    /// Event name, for lookup and diagnostics
    pub name: String,
    /// Command dispatched when the event fires
    pub command: EventCommand,
    /// Span covered by the event; 0 for instantaneous
    #[serde(default)]
    pub duration: f64,
    /// Originating track, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    /// Originating layer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
    /// Filter tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Disabled events are never fired
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl TimelineEvent {
    /// Create an enabled, instantaneous event.
    pub fn new(time: f64, name: impl Into<String>, command: EventCommand) -> Self {
        Self {
            id: EventId::new(),
            time,
            name: name.into(),
            command,
            duration: 0.0,
            track_name: None,
            layer_name: None,
            tags: Vec::new(),
            enabled: true,
        }
    }

    /// Set the covered span.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the originating track.
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track_name = Some(track.into());
        self
    }

    /// Set the originating layer.
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer_name = Some(layer.into());
        self
    }

    /// Set the filter tags.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any of `tags` matches one of this event's tags.
    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.tags.iter().any(|mine| tags.iter().any(|t| mine == t))
    }
}

fn default_color() -> String {
    "#ffffff".to_string()
}

/// A labeled point on the time axis. Carries no execution semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Time in seconds
    pub time: f64,
    /// Display label
    pub label: String,
    /// Display color
    #[serde(default = "default_color")]
    pub color: String,
    /// Span covered by the marker; 0 for a point
    #[serde(default)]
    pub duration: f64,
    /// Free-form annotation data
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, JsonValue>,
}

impl Marker {
    /// Create a point marker.
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
            color: default_color(),
            duration: 0.0,
            metadata: IndexMap::new(),
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the covered span.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

/// A labeled span on the time axis. Carries no execution semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Span start in seconds
    pub start: f64,
    /// Span end in seconds
    pub end: f64,
    /// Display name
    pub name: String,
    /// Display color
    #[serde(default = "default_color")]
    pub color: String,
    /// Free-form annotation data
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, JsonValue>,
}

impl Region {
    /// Create a region.
    pub fn new(start: f64, end: f64, name: impl Into<String>) -> Self {
        Self {
            start,
            end,
            name: name.into(),
            color: default_color(),
            metadata: IndexMap::new(),
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether `time` falls inside the region, endpoints included.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}
