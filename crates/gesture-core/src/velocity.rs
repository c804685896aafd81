//! Release velocity estimation.
//!
//! Keeps the positions of the current stroke that fall inside a trailing
//! time window and reports the average velocity across that window. A
//! finger that pauses before lifting therefore releases with little or no
//! velocity, which is what keeps slow drags from reading as swipes.

use std::collections::VecDeque;

use flingkey_common::config::TrackerSettings;
use flingkey_gesture_model::{MotionSample, TimestampNs, VelocityVector};

/// Default trailing window for velocity estimation.
pub const DEFAULT_HORIZON_NS: u64 = 100_000_000;

/// Tracks one stroke's recent positions.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    horizon_ns: u64,
    samples: VecDeque<(TimestampNs, MotionSample)>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_NS)
    }
}

impl VelocityTracker {
    /// Create a tracker with the given trailing window in nanoseconds.
    pub fn new(horizon_ns: u64) -> Self {
        Self {
            horizon_ns: horizon_ns.max(1),
            samples: VecDeque::new(),
        }
    }

    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self::new(settings.velocity_horizon_ms.saturating_mul(1_000_000))
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record a position. Samples older than the latest one are ignored.
    pub fn add(&mut self, timestamp_ns: TimestampNs, sample: MotionSample) {
        if let Some(&(last_ts, _)) = self.samples.back() {
            if timestamp_ns < last_ts {
                tracing::debug!(
                    timestamp_ns,
                    last_ts,
                    "Ignoring out-of-order velocity sample"
                );
                return;
            }
        }

        self.samples.push_back((timestamp_ns, sample));

        while let Some(&(front_ts, _)) = self.samples.front() {
            if front_ts.saturating_add(self.horizon_ns) < timestamp_ns {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Number of samples currently inside the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Average velocity across the window, in pixels per second.
    ///
    /// Zero when fewer than two samples are held or no time has elapsed.
    pub fn velocity(&self) -> VelocityVector {
        let (Some(&(t0, first)), Some(&(t1, last))) = (self.samples.front(), self.samples.back())
        else {
            return VelocityVector::ZERO;
        };

        if t1 <= t0 {
            return VelocityVector::ZERO;
        }

        let dt = (t1 - t0) as f64 / 1_000_000_000.0;
        let (dx, dy) = first.delta_to(&last);
        VelocityVector::new(dx / dt, dy / dt)
    }
}
