// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared-ownership wrapper for hosts that drive a timeline across threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::timeline::ComposerTimeline;

/// A timeline behind a single coarse lock.
///
/// Every mutation (layer reorder, keyframe insert, event drain) touches
/// overlapping structures, so the supported sharing model is one lock around
/// the whole timeline; there is no internal fine-grained locking.
#[derive(Clone)]
pub struct SharedTimeline {
    inner: Arc<Mutex<ComposerTimeline>>,
}

impl SharedTimeline {
    /// Wrap a timeline for shared use.
    pub fn new(timeline: ComposerTimeline) -> Self {
        Self {
            inner: Arc::new(Mutex::new(timeline)),
        }
    }

    /// Run `f` with exclusive access to the timeline.
    pub fn with<R>(&self, f: impl FnOnce(&mut ComposerTimeline) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}
