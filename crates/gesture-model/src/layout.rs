//! Key rectangles and anchor lookup.
//!
//! The classifier never inspects anchors. Hosts resolve whatever sits under
//! the touch-down point through an [`AnchorLocator`] and pass it along.

use std::path::Path;

use serde::{Deserialize, Serialize};

use flingkey_common::error::{FlingkeyError, FlingkeyResult};

use crate::sample::MotionSample;

/// Resolves the logical object under a touch position.
pub trait AnchorLocator {
    type Anchor;

    /// The anchor at `sample`, if any.
    fn locate(&self, sample: MotionSample) -> Option<Self::Anchor>;
}

/// Locator that never resolves an anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnchor;

impl AnchorLocator for NoAnchor {
    type Anchor = ();

    fn locate(&self, _sample: MotionSample) -> Option<()> {
        None
    }
}

/// A key's rectangle on the touch surface, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBounds {
    /// Key code (e.g., "KeyA", "Space", "Backspace").
    pub code: String,

    /// Text shown on the key.
    #[serde(default)]
    pub label: Option<String>,

    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyBounds {
    pub fn new(code: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            code: code.into(),
            label: None,
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside; left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// An ordered set of keys. Earlier keys win when rectangles overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyLayout {
    /// Layout name for display.
    #[serde(default)]
    pub name: String,

    pub keys: Vec<KeyBounds>,
}

impl KeyLayout {
    pub fn new(name: impl Into<String>, keys: Vec<KeyBounds>) -> Self {
        Self {
            name: name.into(),
            keys,
        }
    }

    /// First key containing `(x, y)`.
    pub fn key_at(&self, x: f64, y: f64) -> Option<&KeyBounds> {
        self.keys.iter().find(|k| k.contains(x, y))
    }

    /// Reject keys with non-finite geometry or non-positive size.
    pub fn validate(&self) -> FlingkeyResult<()> {
        for key in &self.keys {
            let finite = [key.x, key.y, key.width, key.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || key.width <= 0.0 || key.height <= 0.0 {
                return Err(FlingkeyError::layout(format!(
                    "key {:?} has invalid bounds ({}, {}, {}x{})",
                    key.code, key.x, key.y, key.width, key.height
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a layout from a JSON file.
    pub fn load(path: &Path) -> FlingkeyResult<Self> {
        if !path.exists() {
            return Err(FlingkeyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let layout: Self = serde_json::from_str(&content)?;
        layout.validate()?;
        tracing::debug!(name = %layout.name, keys = layout.keys.len(), "Loaded key layout");
        Ok(layout)
    }
}

impl AnchorLocator for KeyLayout {
    type Anchor = KeyBounds;

    fn locate(&self, sample: MotionSample) -> Option<KeyBounds> {
        self.key_at(sample.x, sample.y).cloned()
    }
}
