//! Swipe classification.
//!
//! A swipe is decided from three things only: where the finger went down,
//! where it was released, and how fast it was moving at release. The
//! horizontal test runs first and wins whenever it passes. The vertical test
//! is deliberately stricter: it needs a larger displacement ratio and its
//! release velocity must also dominate the horizontal velocity, so diagonal
//! flicks are not read as vertical swipes.
//!
//! Motions that are large enough to be a gesture but match neither test are
//! reported as [`GestureResult::Ambiguous`].

use flingkey_common::config::GestureSettings;
use flingkey_common::error::{FlingkeyError, FlingkeyResult};
use flingkey_gesture_model::{
    AnchorLocator, GestureResult, MotionSample, SwipeDirection, VelocityVector,
};

/// Stateless swipe classifier.
///
/// Thresholds come straight from the `gesture` section of the config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureClassifier {
    thresholds: GestureSettings,
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(thresholds: GestureSettings) -> Self {
        Self { thresholds }
    }

    /// Validate configured thresholds and build a classifier from them.
    pub fn from_settings(settings: &GestureSettings) -> FlingkeyResult<Self> {
        settings.validate()?;
        Ok(Self::new(*settings))
    }

    /// Create a classifier with the stock keyboard thresholds.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn thresholds(&self) -> &GestureSettings {
        &self.thresholds
    }

    /// Classify one touch-and-release motion.
    ///
    /// `anchor` is returned untouched inside a directional result and
    /// dropped otherwise. Non-finite inputs are not rejected here; use
    /// [`GestureClassifier::try_classify`] at input boundaries.
    pub fn classify<T>(
        &self,
        down: MotionSample,
        up: MotionSample,
        velocity: VelocityVector,
        anchor: Option<T>,
    ) -> GestureResult<T> {
        let t = &self.thresholds;
        let (dx, dy) = down.delta_to(&up);
        let mdx = dx.abs();
        let mdy = dy.abs();
        let VelocityVector { vx, vy } = velocity;

        tracing::debug!(
            dx,
            dy,
            vx,
            vy,
            down_x = down.x,
            down_y = down.y,
            "Classifying fling"
        );

        if mdx >= t.min_gesture_size
            && (mdy == 0.0 || mdx / mdy >= t.axis_dominance_ratio)
            && vx.abs() > t.min_horizontal_velocity
        {
            let direction = if vx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            tracing::debug!(%direction, "Horizontal swipe");
            return GestureResult::directional(direction, anchor);
        }

        if mdy >= t.min_gesture_size
            && (mdx == 0.0 || mdy / mdx >= t.vertical_axis_dominance_ratio)
            && vy.abs() > t.min_vertical_velocity
            && (vx == 0.0 || (vy / vx).abs() >= t.vertical_velocity_dominance_ratio)
        {
            let direction = if vy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
            tracing::debug!(%direction, "Vertical swipe");
            return GestureResult::directional(direction, anchor);
        }

        if mdx >= t.min_gesture_size || mdy >= t.min_gesture_size {
            tracing::debug!("Gesture-sized motion without a direction");
            return GestureResult::Ambiguous;
        }

        GestureResult::None
    }

    /// Validate inputs, then classify.
    ///
    /// Returns [`FlingkeyError::InvalidInput`] if any coordinate or velocity
    /// component is NaN or infinite.
    pub fn try_classify<T>(
        &self,
        down: MotionSample,
        up: MotionSample,
        velocity: VelocityVector,
        anchor: Option<T>,
    ) -> FlingkeyResult<GestureResult<T>> {
        down.validate()
            .map_err(|e| FlingkeyError::invalid_input(format!("down sample: {e}")))?;
        up.validate()
            .map_err(|e| FlingkeyError::invalid_input(format!("release sample: {e}")))?;
        velocity
            .validate()
            .map_err(|e| FlingkeyError::invalid_input(format!("velocity: {e}")))?;
        Ok(self.classify(down, up, velocity, anchor))
    }

    /// Classify, resolving the anchor under `down` through `locator`.
    pub fn classify_with<L: AnchorLocator>(
        &self,
        down: MotionSample,
        up: MotionSample,
        velocity: VelocityVector,
        locator: &L,
    ) -> GestureResult<L::Anchor> {
        self.classify(down, up, velocity, locator.locate(down))
    }
}
