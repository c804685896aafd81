//! Splits a touch stream into completed strokes.
//!
//! A stroke runs from a `down` event to the matching `up`. Each completed
//! stroke carries exactly what the classifier needs: the down sample, the
//! release sample, and the release velocity.

use serde::{Deserialize, Serialize};

use flingkey_common::config::TrackerSettings;
use flingkey_gesture_model::{MotionSample, TimestampNs, TouchEvent, TouchPhase, VelocityVector};

use crate::velocity::VelocityTracker;

/// A completed touch-and-release motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub down: MotionSample,
    pub up: MotionSample,
    pub velocity: VelocityVector,
    pub start_ns: TimestampNs,
    pub end_ns: TimestampNs,
}

impl Stroke {
    pub fn duration_ns(&self) -> u64 {
        self.end_ns.saturating_sub(self.start_ns)
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    down: MotionSample,
    start_ns: TimestampNs,
}

/// Stateful segmenter fed one event at a time.
#[derive(Debug, Clone, Default)]
pub struct StrokeSegmenter {
    tracker: VelocityTracker,
    active: Option<ActiveStroke>,
    cancelled: u64,
}

impl StrokeSegmenter {
    pub fn new(tracker: VelocityTracker) -> Self {
        Self {
            tracker,
            active: None,
            cancelled: 0,
        }
    }

    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self::new(VelocityTracker::from_settings(settings))
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Strokes discarded by `cancel` events or restarted by a second `down`.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Feed one event. Returns a stroke when `event` completes one.
    pub fn push(&mut self, event: &TouchEvent) -> Option<Stroke> {
        let sample = event.sample();
        match event.phase {
            TouchPhase::Down => {
                if self.active.is_some() {
                    tracing::warn!(
                        t = event.timestamp_ns,
                        "Touch down while a stroke is active, restarting"
                    );
                    self.cancelled += 1;
                }
                self.tracker.clear();
                self.tracker.add(event.timestamp_ns, sample);
                self.active = Some(ActiveStroke {
                    down: sample,
                    start_ns: event.timestamp_ns,
                });
                None
            }
            TouchPhase::Move => {
                if self.active.is_none() {
                    tracing::warn!(t = event.timestamp_ns, "Touch move without down, ignoring");
                    return None;
                }
                self.tracker.add(event.timestamp_ns, sample);
                None
            }
            TouchPhase::Up => {
                let Some(active) = self.active.take() else {
                    tracing::warn!(t = event.timestamp_ns, "Touch up without down, ignoring");
                    return None;
                };
                self.tracker.add(event.timestamp_ns, sample);
                let stroke = Stroke {
                    down: active.down,
                    up: sample,
                    velocity: self.tracker.velocity(),
                    start_ns: active.start_ns,
                    end_ns: event.timestamp_ns,
                };
                self.tracker.clear();
                tracing::trace!(?stroke, "Stroke completed");
                Some(stroke)
            }
            TouchPhase::Cancel => {
                if self.active.take().is_some() {
                    tracing::debug!(t = event.timestamp_ns, "Stroke cancelled");
                    self.cancelled += 1;
                }
                self.tracker.clear();
                None
            }
        }
    }

    /// Feed a whole event slice and collect completed strokes.
    ///
    /// A stroke still open at the end of the slice is left active.
    pub fn segment(&mut self, events: &[TouchEvent]) -> Vec<Stroke> {
        events.iter().filter_map(|e| self.push(e)).collect()
    }
}

/// Segment a complete trace with the given tracker settings.
pub fn segment_trace(events: &[TouchEvent], settings: &TrackerSettings) -> Vec<Stroke> {
    let mut segmenter = StrokeSegmenter::from_settings(settings);
    let strokes = segmenter.segment(events);
    if segmenter.is_active() {
        tracing::debug!("Trace ended mid-stroke, dropping the unfinished stroke");
    }
    strokes
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    fn swipe_right(start_ns: u64) -> Vec<TouchEvent> {
        let mut events = vec![TouchEvent::down(start_ns, 100.0, 400.0)];
        for i in 1..8u64 {
            events.push(TouchEvent::moved(
                start_ns + i * 10 * MS,
                100.0 + 30.0 * i as f64,
                400.0,
            ));
        }
        events.push(TouchEvent::up(start_ns + 80 * MS, 340.0, 400.0));
        events
    }

    #[test]
    fn test_single_stroke() {
        let strokes = segment_trace(&swipe_right(0), &TrackerSettings::default());
        assert_eq!(strokes.len(), 1);

        let stroke = strokes[0];
        assert_eq!(stroke.down, MotionSample::new(100.0, 400.0));
        assert_eq!(stroke.up, MotionSample::new(340.0, 400.0));
        assert_eq!(stroke.duration_ns(), 80 * MS);
        assert!((stroke.velocity.vx - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut segmenter = StrokeSegmenter::default();
        let events = vec![
            TouchEvent::down(0, 10.0, 10.0),
            TouchEvent::moved(10 * MS, 50.0, 10.0),
            TouchEvent::cancel(20 * MS, 90.0, 10.0),
            TouchEvent::up(30 * MS, 130.0, 10.0),
        ];
        assert!(segmenter.segment(&events).is_empty());
        assert_eq!(segmenter.cancelled(), 1);
        assert!(!segmenter.is_active());
    }

    #[test]
    fn test_second_down_restarts() {
        let mut segmenter = StrokeSegmenter::default();
        let mut events = vec![TouchEvent::down(0, 900.0, 900.0)];
        events.extend(swipe_right(10 * MS));
        let strokes = segmenter.segment(&events);

        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].down, MotionSample::new(100.0, 400.0));
        assert_eq!(strokes[0].start_ns, 10 * MS);
        assert_eq!(segmenter.cancelled(), 1);
    }

    #[test]
    fn test_stray_move_and_up_ignored() {
        let mut segmenter = StrokeSegmenter::default();
        assert_eq!(segmenter.push(&TouchEvent::moved(0, 1.0, 1.0)), None);
        assert_eq!(segmenter.push(&TouchEvent::up(5 * MS, 1.0, 1.0)), None);
        assert!(!segmenter.is_active());
    }

    #[test]
    fn test_unfinished_stroke_left_active() {
        let mut segmenter = StrokeSegmenter::default();
        let events = vec![
            TouchEvent::down(0, 0.0, 0.0),
            TouchEvent::moved(10 * MS, 20.0, 0.0),
        ];
        assert!(segmenter.segment(&events).is_empty());
        assert!(segmenter.is_active());
    }

    #[test]
    fn test_velocity_does_not_leak_between_strokes() {
        let mut events = swipe_right(0);
        events.push(TouchEvent::down(1_000 * MS, 500.0, 500.0));
        events.push(TouchEvent::up(1_050 * MS, 500.0, 500.0));

        let strokes = segment_trace(&events, &TrackerSettings::default());
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1].velocity, VelocityVector::ZERO);
    }
}
