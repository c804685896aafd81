//! Flingkey Gesture Core
//!
//! Turns touch motion into swipe decisions:
//! - **Classifier:** Decide LEFT/RIGHT/UP/DOWN from a down sample, a release
//!   sample, and the release velocity
//! - **Velocity:** Estimate release velocity from timestamped positions
//! - **Strokes:** Split a recorded touch stream into down-to-up strokes
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod classifier;
pub mod stroke;
pub mod velocity;

pub use classifier::GestureClassifier;
pub use stroke::{segment_trace, Stroke, StrokeSegmenter};
pub use velocity::VelocityTracker;
