//! Swipe directions and classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one touch-and-release motion.
///
/// `T` is whatever the caller associated with the touch-down point (for a
/// keyboard, the key under the finger). The classifier only carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureResult<T> {
    /// The motion was too small to be a gesture.
    None,

    /// A gesture-sized motion that matched no direction.
    ///
    /// Hosts usually treat it as consumed and skip their default handling.
    Ambiguous,

    /// A recognized swipe.
    Directional {
        direction: SwipeDirection,
        anchor: Option<T>,
    },
}

impl<T> GestureResult<T> {
    /// Build a directional result.
    pub fn directional(direction: SwipeDirection, anchor: Option<T>) -> Self {
        Self::Directional { direction, anchor }
    }

    /// The swipe direction, if one was recognized.
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            Self::Directional { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// The caller-supplied anchor of a directional result.
    pub fn anchor(&self) -> Option<&T> {
        match self {
            Self::Directional { anchor, .. } => anchor.as_ref(),
            _ => None,
        }
    }

    /// Whether the host should treat the motion as handled.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ambiguous => "ambiguous",
            Self::Directional { direction, .. } => direction.as_str(),
        }
    }

    /// Replace the anchor type, keeping the outcome.
    pub fn map_anchor<U>(self, f: impl FnOnce(T) -> U) -> GestureResult<U> {
        match self {
            Self::None => GestureResult::None,
            Self::Ambiguous => GestureResult::Ambiguous,
            Self::Directional { direction, anchor } => GestureResult::Directional {
                direction,
                anchor: anchor.map(f),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axes() {
        assert!(SwipeDirection::Left.is_horizontal());
        assert!(SwipeDirection::Right.is_horizontal());
        assert!(SwipeDirection::Up.is_vertical());
        assert!(SwipeDirection::Down.is_vertical());
        assert_eq!(SwipeDirection::Down.to_string(), "down");
    }

    #[test]
    fn test_result_accessors() {
        let none: GestureResult<u32> = GestureResult::None;
        assert_eq!(none.direction(), None);
        assert!(!none.is_consumed());
        assert_eq!(none.label(), "none");

        let ambiguous: GestureResult<u32> = GestureResult::Ambiguous;
        assert_eq!(ambiguous.direction(), None);
        assert!(ambiguous.is_consumed());

        let swipe = GestureResult::directional(SwipeDirection::Left, Some(7u32));
        assert_eq!(swipe.direction(), Some(SwipeDirection::Left));
        assert_eq!(swipe.anchor(), Some(&7));
        assert!(swipe.is_consumed());
        assert_eq!(swipe.label(), "left");
    }

    #[test]
    fn test_map_anchor_keeps_outcome() {
        let swipe = GestureResult::directional(SwipeDirection::Up, Some(3u32));
        let mapped = swipe.map_anchor(|n| format!("key-{n}"));
        assert_eq!(mapped.direction(), Some(SwipeDirection::Up));
        assert_eq!(mapped.anchor().map(String::as_str), Some("key-3"));

        let ambiguous: GestureResult<u32> = GestureResult::Ambiguous;
        assert_eq!(
            ambiguous.map_anchor(|n| n * 2),
            GestureResult::<u32>::Ambiguous
        );
    }

    #[test]
    fn test_json_shape() {
        let swipe: GestureResult<String> = GestureResult::directional(SwipeDirection::Right, None);
        let json = serde_json::to_string(&swipe).unwrap();
        assert!(json.contains("\"kind\":\"directional\""));
        assert!(json.contains("\"direction\":\"right\""));
        assert!(json.contains("\"anchor\":null"));

        let none: GestureResult<String> = GestureResult::None;
        assert_eq!(serde_json::to_string(&none).unwrap(), r#"{"kind":"none"}"#);
    }
}
