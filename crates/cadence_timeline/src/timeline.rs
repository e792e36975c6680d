// SPDX-License-Identifier: MIT OR Apache-2.0
//! The composer timeline: layers, event schedule, annotations, playhead.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::event::{CommandSink, EventId, Marker, Region, TimelineEvent};
use crate::keyframe::Keyframe;
use crate::layer::Layer;
use crate::value::Value;

/// Playback state of the composer timeline.
///
/// `Paused` and `Stopped` both leave the playhead at rest; only `stop()`
/// resets it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// At rest, playhead reset on entry via `stop()`
    #[default]
    Stopped,
    /// Playhead advancing
    Playing,
    /// At rest, playhead retained
    Paused,
}

/// Heap entry: ascending fire time, then insertion sequence.
///
/// The sequence number makes the ordering total on exact time ties, so two
/// events scheduled at the same instant always fire in insertion order.
#[derive(Debug, Clone)]
struct ScheduledEvent {
    time: f64,
    seq: u64,
    event: TimelineEvent,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted so the std max-heap pops the earliest entry first.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Orchestrates layers, the event schedule, markers/regions, and a playhead.
///
/// All operations are synchronous computation over in-memory structures; the
/// owning driving loop advances the playhead once per rendered frame and
/// samples whatever properties it cares about. For cross-thread use wrap the
/// whole timeline in [`crate::SharedTimeline`].
#[derive(Debug)]
pub struct ComposerTimeline {
    duration: f64,
    fps: f64,
    current_time: f64,
    /// Multiplier applied by [`ComposerTimeline::advance`]
    pub playback_speed: f64,
    state: PlaybackState,
    /// Whether `advance` wraps into the loop window at the end
    pub loop_enabled: bool,
    /// Loop window start
    pub loop_start: f64,
    /// Loop window end
    pub loop_end: f64,
    layers: Vec<Layer>,
    schedule: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
    pending: Vec<TimelineEvent>,
    markers: Vec<Marker>,
    regions: Vec<Region>,
}

impl ComposerTimeline {
    /// Create an empty timeline with a fixed duration and frame rate.
    pub fn new(duration: f64, fps: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            fps: fps.max(0.0),
            current_time: 0.0,
            playback_speed: 1.0,
            state: PlaybackState::Stopped,
            loop_enabled: false,
            loop_start: 0.0,
            loop_end: duration,
            layers: Vec::new(),
            schedule: BinaryHeap::new(),
            next_seq: 0,
            pending: Vec::new(),
            markers: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Playhead position, always within `[0, duration]`.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the playhead is advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Convert a time in seconds to a frame number.
    pub fn time_to_frame(&self, time: f64) -> u64 {
        (time * self.fps).max(0.0) as u64
    }

    /// Convert a frame number to a time in seconds.
    pub fn frame_to_time(&self, frame: u64) -> f64 {
        if self.fps > 0.0 {
            frame as f64 / self.fps
        } else {
            0.0
        }
    }

    fn frame_interval(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }

    // ---- playhead state machine ----

    /// Clamp and set the playhead.
    ///
    /// Any enabled scheduled event within one frame interval of the new
    /// position is consumed from the schedule and queued for dispatch.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration);
        let window = self.frame_interval();
        let t = self.current_time;
        let mut due = Vec::new();
        let mut keep = Vec::new();
        for entry in std::mem::take(&mut self.schedule).into_vec() {
            if entry.event.enabled && (entry.time - t).abs() <= window {
                due.push(entry);
            } else {
                keep.push(entry);
            }
        }
        self.schedule = BinaryHeap::from(keep);
        due.sort_by(|a, b| a.time.total_cmp(&b.time).then_with(|| a.seq.cmp(&b.seq)));
        self.pending.extend(due.into_iter().map(|e| e.event));
    }

    /// Enter `Playing`, queuing every scheduled event at or before the
    /// playhead.
    ///
    /// A playhead already at the end restarts from zero. Queued events are
    /// released in ascending (time, insertion) order through
    /// [`ComposerTimeline::dispatch_pending`] or
    /// [`ComposerTimeline::take_pending`].
    pub fn play(&mut self) {
        if self.current_time >= self.duration {
            self.current_time = 0.0;
        }
        self.state = PlaybackState::Playing;
        tracing::debug!(time = self.current_time, "timeline playing");
        self.queue_due_events();
    }

    /// Freeze the playhead in place.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and reset the playhead to zero.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.current_time = 0.0;
        tracing::debug!("timeline stopped");
    }

    /// Advance the playhead by `delta * playback_speed` while playing.
    ///
    /// With looping enabled the playhead wraps into
    /// `[loop_start, loop_end)`; otherwise it parks at the end and the
    /// timeline stops. Events crossed by the playhead are queued.
    pub fn advance(&mut self, delta: f64) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let next = self.current_time + delta * self.playback_speed;
        let end = if self.loop_enabled {
            self.loop_end.clamp(0.0, self.duration)
        } else {
            self.duration
        };
        if next >= end {
            if self.loop_enabled {
                let start = self.loop_start.clamp(0.0, end);
                let span = end - start;
                self.current_time = if span > 0.0 {
                    start + (next - end) % span
                } else {
                    start
                };
            } else {
                self.current_time = self.duration;
                self.state = PlaybackState::Stopped;
            }
        } else {
            self.current_time = next.clamp(0.0, self.duration);
        }
        self.queue_due_events();
    }

    /// Pop everything at or before the playhead; overshoot goes back on the
    /// heap rather than being discarded.
    fn queue_due_events(&mut self) {
        let t = self.current_time;
        while let Some(entry) = self.schedule.pop() {
            if entry.time > t {
                self.schedule.push(entry);
                break;
            }
            // Min-heap pops arrive already in ascending (time, seq) order.
            if entry.event.enabled {
                self.pending.push(entry.event);
            }
        }
    }

    /// Drain queued events into the sink.
    ///
    /// Each command failure is caught and logged individually; later events
    /// still run. Returns the number of events dispatched successfully.
    pub fn dispatch_pending(&mut self, sink: &mut dyn CommandSink) -> usize {
        let mut dispatched = 0;
        for event in std::mem::take(&mut self.pending) {
            match sink.dispatch(&event) {
                Ok(()) => dispatched += 1,
                Err(err) => {
                    tracing::warn!(event = %event.name, error = %err, "event command failed");
                }
            }
        }
        dispatched
    }

    /// Take ownership of the queued events without dispatching them.
    pub fn take_pending(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.pending)
    }

    // ---- layers ----

    /// Add a layer and re-establish ascending z-order.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
        self.sort_layers();
    }

    /// Get a layer by name.
    pub fn get_layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Get a mutable layer by name.
    ///
    /// Change `z_index` through [`ComposerTimeline::set_layer_z_index`] or
    /// the ordering helpers so the layer list stays sorted.
    pub fn get_layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Remove a layer by name.
    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let idx = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(idx))
    }

    /// All layers in ascending z-index order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer names in ascending z-index order.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    fn sort_layers(&mut self) {
        self.layers.sort_by_key(|l| l.z_index);
    }

    /// Assign a z-index and re-sort; false when the layer doesn't exist.
    pub fn set_layer_z_index(&mut self, name: &str, z_index: i64) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|l| l.name == name) else {
            return false;
        };
        layer.z_index = z_index;
        self.sort_layers();
        true
    }

    /// Swap z-indices with the next layer above; no-op when already on top.
    pub fn move_layer_forward(&mut self, name: &str) -> bool {
        let Some(idx) = self.layers.iter().position(|l| l.name == name) else {
            return false;
        };
        if idx + 1 < self.layers.len() {
            let lower = self.layers[idx].z_index;
            let upper = self.layers[idx + 1].z_index;
            self.layers[idx].z_index = upper;
            self.layers[idx + 1].z_index = lower;
            self.sort_layers();
        }
        true
    }

    /// Swap z-indices with the next layer below; no-op when already at the
    /// bottom.
    pub fn move_layer_backward(&mut self, name: &str) -> bool {
        let Some(idx) = self.layers.iter().position(|l| l.name == name) else {
            return false;
        };
        if idx > 0 {
            let lower = self.layers[idx - 1].z_index;
            let upper = self.layers[idx].z_index;
            self.layers[idx - 1].z_index = upper;
            self.layers[idx].z_index = lower;
            self.sort_layers();
        }
        true
    }

    /// Move a layer above every other layer.
    pub fn move_layer_to_top(&mut self, name: &str) -> bool {
        let Some(max) = self.layers.iter().map(|l| l.z_index).max() else {
            return false;
        };
        let Some(layer) = self.layers.iter_mut().find(|l| l.name == name) else {
            return false;
        };
        layer.z_index = max + 10;
        self.sort_layers();
        true
    }

    /// Move a layer below every other layer.
    pub fn move_layer_to_bottom(&mut self, name: &str) -> bool {
        let Some(min) = self.layers.iter().map(|l| l.z_index).min() else {
            return false;
        };
        let Some(layer) = self.layers.iter_mut().find(|l| l.name == name) else {
            return false;
        };
        layer.z_index = min - 10;
        self.sort_layers();
        true
    }

    // ---- keyframes ----

    /// Insert a keyframe into `layer/track/property`.
    ///
    /// Returns false when the named layer or track does not exist; callers
    /// must check rather than expect an error.
    pub fn add_keyframe(
        &mut self,
        layer: &str,
        track: &str,
        property: &str,
        keyframe: Keyframe,
    ) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|l| l.name == layer) else {
            return false;
        };
        let Some(track) = layer.get_track_mut(track) else {
            return false;
        };
        track.add_keyframe(property, keyframe);
        true
    }

    /// Sample `layer/track/property` at `time`.
    pub fn value_at(&self, layer: &str, track: &str, property: &str, time: f64) -> Option<Value> {
        self.get_layer(layer)?.sample(track, property, time)
    }

    // ---- events ----

    /// Schedule an event; returns its ID.
    pub fn add_event(&mut self, event: TimelineEvent) -> EventId {
        let id = event.id;
        let entry = ScheduledEvent {
            time: event.time,
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.schedule.push(entry);
        id
    }

    /// Remove a scheduled event by ID.
    pub fn remove_event(&mut self, id: EventId) -> bool {
        let before = self.schedule.len();
        self.schedule.retain(|e| e.event.id != id);
        before != self.schedule.len()
    }

    /// Enable or disable a scheduled event by ID.
    pub fn set_event_enabled(&mut self, id: EventId, enabled: bool) -> bool {
        let mut entries = std::mem::take(&mut self.schedule).into_vec();
        let mut found = false;
        for entry in &mut entries {
            if entry.event.id == id {
                entry.event.enabled = enabled;
                found = true;
            }
        }
        self.schedule = BinaryHeap::from(entries);
        found
    }

    /// Number of events still scheduled.
    pub fn scheduled_event_count(&self) -> usize {
        self.schedule.len()
    }

    /// Enabled events with `start <= time <= end`, optionally filtered to
    /// those sharing at least one tag, ascending by (time, insertion).
    pub fn get_events_in_range(
        &self,
        start: f64,
        end: f64,
        tags: Option<&[&str]>,
    ) -> Vec<&TimelineEvent> {
        let mut hits: Vec<&ScheduledEvent> = self
            .schedule
            .iter()
            .filter(|e| e.event.enabled && e.time >= start && e.time <= end)
            .filter(|e| tags.map_or(true, |tags| e.event.has_any_tag(tags)))
            .collect();
        hits.sort_by(|a, b| a.time.total_cmp(&b.time).then_with(|| a.seq.cmp(&b.seq)));
        hits.into_iter().map(|e| &e.event).collect()
    }

    /// Scheduled events originating from `track`, ascending by time.
    pub fn events_for_track(&self, track: &str) -> Vec<&TimelineEvent> {
        let mut hits: Vec<&ScheduledEvent> = self
            .schedule
            .iter()
            .filter(|e| e.event.track_name.as_deref() == Some(track))
            .collect();
        hits.sort_by(|a, b| a.time.total_cmp(&b.time).then_with(|| a.seq.cmp(&b.seq)));
        hits.into_iter().map(|e| &e.event).collect()
    }

    // ---- annotations ----

    /// Add a marker, keeping markers sorted by time.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
        self.markers.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// All markers in time order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers with `start <= time <= end`.
    pub fn markers_in_range(&self, start: f64, end: f64) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.time >= start && m.time <= end)
            .collect()
    }

    /// Remove the first marker with the given label.
    pub fn remove_marker(&mut self, label: &str) -> bool {
        let Some(idx) = self.markers.iter().position(|m| m.label == label) else {
            return false;
        };
        self.markers.remove(idx);
        true
    }

    /// Add a region, keeping regions sorted by start time.
    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
        self.regions.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    /// All regions in start-time order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions covering `time`.
    pub fn regions_at(&self, time: f64) -> Vec<&Region> {
        self.regions.iter().filter(|r| r.contains(time)).collect()
    }

    /// Remove the first region with the given name.
    pub fn remove_region(&mut self, name: &str) -> bool {
        let Some(idx) = self.regions.iter().position(|r| r.name == name) else {
            return false;
        };
        self.regions.remove(idx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CommandError, EventCommand};
    use crate::track::{Track, TrackKind};

    /// Sink that records dispatched command kinds and can fail on demand.
    #[derive(Default)]
    struct RecordingSink {
        seen: Vec<String>,
        fail_on: Option<String>,
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&mut self, event: &TimelineEvent) -> Result<(), CommandError> {
            if self.fail_on.as_deref() == Some(event.command.kind.as_str()) {
                return Err(CommandError::Failed("refused".to_string()));
            }
            self.seen.push(event.command.kind.clone());
            Ok(())
        }
    }

    fn timeline_with_layers(zs: &[(&str, i64)]) -> ComposerTimeline {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        for &(name, z) in zs {
            timeline.add_layer(Layer::new(name).with_z_index(z));
        }
        timeline
    }

    fn event_at(time: f64, kind: &str) -> TimelineEvent {
        TimelineEvent::new(time, kind, EventCommand::new(kind))
    }

    #[test]
    fn test_seek_clamps_playhead() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.seek(-5.0);
        assert_eq!(timeline.current_time(), 0.0);
        timeline.seek(99.0);
        assert_eq!(timeline.current_time(), 10.0);
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        assert_eq!(timeline.state(), PlaybackState::Stopped);
        timeline.play();
        assert!(timeline.is_playing());
        timeline.seek(4.0);
        timeline.pause();
        assert_eq!(timeline.state(), PlaybackState::Paused);
        assert_eq!(timeline.current_time(), 4.0);
        timeline.stop();
        assert_eq!(timeline.state(), PlaybackState::Stopped);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn test_play_at_end_restarts() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.seek(10.0);
        timeline.play();
        assert_eq!(timeline.current_time(), 0.0);
        assert!(timeline.is_playing());
    }

    #[test]
    fn test_play_queues_due_events_in_order() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(event_at(3.0, "later"));
        timeline.add_event(event_at(1.0, "first"));
        timeline.add_event(event_at(2.0, "second"));
        timeline.add_event(event_at(9.0, "future"));
        timeline.seek(5.0);
        timeline.play();
        let fired: Vec<String> = timeline
            .take_pending()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(fired, vec!["first", "second", "later"]);
        // The future event was partitioned back, not discarded.
        assert_eq!(timeline.scheduled_event_count(), 1);
    }

    #[test]
    fn test_equal_time_events_fire_in_insertion_order() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(event_at(2.0, "a"));
        timeline.add_event(event_at(2.0, "b"));
        timeline.add_event(event_at(2.0, "c"));
        timeline.seek(5.0);
        timeline.play();
        let fired: Vec<String> = timeline
            .take_pending()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dispatch_isolates_failures() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(event_at(1.0, "ok_one"));
        timeline.add_event(event_at(2.0, "boom"));
        timeline.add_event(event_at(3.0, "ok_two"));
        timeline.seek(5.0);
        timeline.play();
        let mut sink = RecordingSink {
            fail_on: Some("boom".to_string()),
            ..Default::default()
        };
        let dispatched = timeline.dispatch_pending(&mut sink);
        assert_eq!(dispatched, 2);
        assert_eq!(sink.seen, vec!["ok_one", "ok_two"]);
        assert!(timeline.take_pending().is_empty());
    }

    #[test]
    fn test_seek_fires_events_within_frame_window() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(event_at(5.0, "near"));
        timeline.add_event(event_at(6.0, "far"));
        // One frame at 30 fps is ~0.0333s.
        timeline.seek(5.02);
        let fired: Vec<String> = timeline
            .take_pending()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(fired, vec!["near"]);
        assert_eq!(timeline.scheduled_event_count(), 1);
    }

    #[test]
    fn test_disabled_events_never_fire() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let id = timeline.add_event(event_at(1.0, "ghost"));
        assert!(timeline.set_event_enabled(id, false));
        timeline.seek(5.0);
        timeline.play();
        assert!(timeline.take_pending().is_empty());
    }

    #[test]
    fn test_events_in_range_tag_filter() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(
            TimelineEvent::new(2.0, "flash", EventCommand::new("flash")).with_tags(["fx"]),
        );
        let fx = timeline.get_events_in_range(0.0, 3.0, Some(&["fx"]));
        assert_eq!(fx.len(), 1);
        assert_eq!(fx[0].name, "flash");
        assert!(timeline
            .get_events_in_range(0.0, 3.0, Some(&["audio"]))
            .is_empty());
        assert_eq!(timeline.get_events_in_range(0.0, 3.0, None).len(), 1);
        assert!(timeline.get_events_in_range(3.0, 9.0, None).is_empty());
    }

    #[test]
    fn test_events_for_track() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_event(event_at(4.0, "loose"));
        timeline.add_event(event_at(3.0, "cue_b").with_track("beats"));
        timeline.add_event(event_at(1.0, "cue_a").with_track("beats"));
        let cues: Vec<&str> = timeline
            .events_for_track("beats")
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(cues, vec!["cue_a", "cue_b"]);
        assert!(timeline.events_for_track("other").is_empty());
    }

    #[test]
    fn test_remove_event() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let id = timeline.add_event(event_at(1.0, "gone"));
        assert!(timeline.remove_event(id));
        assert!(!timeline.remove_event(id));
        assert_eq!(timeline.scheduled_event_count(), 0);
    }

    #[test]
    fn test_advance_respects_speed_and_stops_at_end() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.playback_speed = 2.0;
        timeline.play();
        timeline.advance(1.0);
        assert_eq!(timeline.current_time(), 2.0);
        timeline.advance(10.0);
        assert_eq!(timeline.current_time(), 10.0);
        assert_eq!(timeline.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_advance_wraps_into_loop_window() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.loop_enabled = true;
        timeline.loop_start = 2.0;
        timeline.loop_end = 6.0;
        timeline.play();
        timeline.seek(5.0);
        timeline.advance(2.0);
        // 7.0 overshoots the window end by 1.0, landing at 3.0.
        assert_eq!(timeline.current_time(), 3.0);
        assert!(timeline.is_playing());
    }

    #[test]
    fn test_layers_sorted_ascending_by_z() {
        let timeline = timeline_with_layers(&[("mid", 10), ("top", 20), ("bottom", 0)]);
        assert_eq!(timeline.layer_names(), vec!["bottom", "mid", "top"]);
    }

    #[test]
    fn test_move_layer_to_top_beats_every_z() {
        let mut timeline = timeline_with_layers(&[("a", 0), ("b", 10), ("c", 20)]);
        assert!(timeline.move_layer_to_top("a"));
        let layers = timeline.layers();
        assert_eq!(layers.last().map(|l| l.name.as_str()), Some("a"));
        let a_z = timeline.get_layer("a").map(|l| l.z_index);
        assert!(layers[..layers.len() - 1]
            .iter()
            .all(|l| Some(l.z_index) < a_z));
    }

    #[test]
    fn test_move_layer_to_bottom_yields_expected_sequence() {
        let mut timeline = timeline_with_layers(&[("a", 0), ("b", 10), ("c", 20)]);
        assert!(timeline.move_layer_to_bottom("c"));
        let zs: Vec<i64> = timeline.layers().iter().map(|l| l.z_index).collect();
        assert_eq!(zs, vec![-10, 0, 10]);
        assert_eq!(timeline.layer_names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_layer_forward_swaps_neighbors() {
        let mut timeline = timeline_with_layers(&[("a", 0), ("b", 10)]);
        assert!(timeline.move_layer_forward("a"));
        assert_eq!(timeline.layer_names(), vec!["b", "a"]);
        // Already on top: no-op, still reported as found.
        assert!(timeline.move_layer_forward("a"));
        assert_eq!(timeline.layer_names(), vec!["b", "a"]);
        assert!(!timeline.move_layer_forward("missing"));
    }

    #[test]
    fn test_add_keyframe_checks_names() {
        let mut timeline = timeline_with_layers(&[("main", 0)]);
        timeline
            .get_layer_mut("main")
            .unwrap()
            .add_track(Track::new("motion", TrackKind::Property));
        assert!(timeline.add_keyframe("main", "motion", "x", Keyframe::new(0.0, 1.0)));
        assert!(!timeline.add_keyframe("ghost", "motion", "x", Keyframe::new(0.0, 1.0)));
        assert!(!timeline.add_keyframe("main", "ghost", "x", Keyframe::new(0.0, 1.0)));
        assert_eq!(
            timeline.value_at("main", "motion", "x", 0.0),
            Some(Value::Scalar(1.0))
        );
    }

    #[test]
    fn test_marker_and_region_queries() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_marker(Marker::new(5.0, "beat"));
        timeline.add_marker(Marker::new(1.0, "start"));
        assert_eq!(timeline.markers()[0].label, "start");
        assert_eq!(timeline.markers_in_range(4.0, 6.0).len(), 1);
        assert!(timeline.remove_marker("beat"));
        assert!(!timeline.remove_marker("beat"));

        timeline.add_region(Region::new(2.0, 4.0, "intro"));
        assert_eq!(timeline.regions_at(3.0).len(), 1);
        assert!(timeline.regions_at(5.0).is_empty());
        assert!(timeline.remove_region("intro"));
    }

    #[test]
    fn test_frame_conversions() {
        let timeline = ComposerTimeline::new(10.0, 30.0);
        assert_eq!(timeline.time_to_frame(1.0), 30);
        assert_eq!(timeline.frame_to_time(60), 2.0);
    }
}
