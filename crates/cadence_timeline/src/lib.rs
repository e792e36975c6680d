// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline/composer engine for Cadence.
//!
//! This crate provides the temporal data model driving a composition:
//! - Keyframes with linear, eased, bezier, step, and spring interpolation
//! - Tracks holding per-property keyframe channels
//! - Layers with z-ordering, visibility/lock/solo flags, and transforms
//! - One-shot scheduled events carrying serializable commands
//! - Marker/region annotations
//! - JSON export/import of the whole timeline
//!
//! ## Architecture
//!
//! The engine is built on:
//! - A recursive blendable [`Value`] type
//! - A min-heap event schedule with a total ordering on fire times
//! - A playhead state machine (`Stopped`/`Playing`/`Paused`)
//! - Command dispatch through the [`CommandSink`] seam; the timeline never
//!   touches the render surface directly

pub mod error;
pub mod event;
pub mod keyframe;
pub mod layer;
mod persist;
pub mod shared;
pub mod timeline;
pub mod track;
pub mod value;

pub use error::TimelineError;
pub use event::{
    CommandError, CommandSink, EventCommand, EventId, Marker, Region, TimelineEvent,
};
pub use keyframe::{InterpolationKind, Keyframe, SpringParams};
pub use layer::{Layer, LayerTransform};
pub use shared::SharedTimeline;
pub use timeline::{ComposerTimeline, PlaybackState};
pub use track::{Track, TrackKind};
pub use value::Value;
