//! Flingkey Gesture Model
//!
//! Defines the data contracts shared by the classifier and its hosts:
//! - **Samples:** Touch positions and release velocities
//! - **Gestures:** Swipe directions and classification results
//! - **Traces:** Recorded touch streams in JSONL form
//! - **Layouts:** Key rectangles used to resolve the anchor under a touch
//!
//! All coordinates are in surface pixels with `y` growing downward.

pub mod gesture;
pub mod layout;
pub mod sample;
pub mod trace;

pub use gesture::*;
pub use layout::*;
pub use sample::*;
pub use trace::*;
