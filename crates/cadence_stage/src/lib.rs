// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer-to-scene bridging for Cadence.
//!
//! This crate connects a [`cadence_timeline::ComposerTimeline`]'s layer
//! ordering to an external, mutable render-object list:
//! - Object registration under named layers
//! - Paint-order application (ascending z-index, solo-set gating)
//! - Per-layer opacity/transform propagation
//!
//! The render surface stays behind the [`SceneList`] trait; the manager only
//! ever talks to an ordered list of opaque handles.

pub mod manager;
pub mod scene;

pub use manager::LayerManager;
pub use scene::{LayerState, ObjectHandle, SceneList, StageScene};
