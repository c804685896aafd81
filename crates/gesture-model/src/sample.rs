//! Touch positions and release velocities.

use serde::{Deserialize, Serialize};

use flingkey_common::error::{FlingkeyError, FlingkeyResult};

/// A single touch position in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
}

/// Signed release velocity in pixels per second.
///
/// Positive `vx` is rightward motion, positive `vy` is downward motion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityVector {
    pub vx: f64,
    pub vy: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement `(dx, dy)` from `self` to `other`.
    pub fn delta_to(&self, other: &MotionSample) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Reject NaN or infinite coordinates.
    pub fn validate(&self) -> FlingkeyResult<()> {
        FlingkeyError::ensure_finite("x", self.x)?;
        FlingkeyError::ensure_finite("y", self.y)
    }
}

impl VelocityVector {
    pub const ZERO: VelocityVector = VelocityVector { vx: 0.0, vy: 0.0 };

    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    /// Magnitude of the velocity (px/s).
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Reject NaN or infinite components.
    pub fn validate(&self) -> FlingkeyResult<()> {
        FlingkeyError::ensure_finite("vx", self.vx)?;
        FlingkeyError::ensure_finite("vy", self.vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_to() {
        let down = MotionSample::new(10.0, 40.0);
        let up = MotionSample::new(160.0, 30.0);
        assert_eq!(down.delta_to(&up), (150.0, -10.0));
    }

    #[test]
    fn test_speed() {
        let v = VelocityVector::new(300.0, -400.0);
        assert!((v.speed() - 500.0).abs() < 1e-9);
        assert_eq!(VelocityVector::ZERO.speed(), 0.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(MotionSample::new(1.0, 2.0).validate().is_ok());
        assert!(MotionSample::new(f64::NAN, 2.0).validate().is_err());
        assert!(MotionSample::new(1.0, f64::INFINITY).validate().is_err());

        assert!(VelocityVector::new(1500.0, 0.0).validate().is_ok());
        assert!(VelocityVector::new(0.0, f64::NAN).validate().is_err());
    }
}
