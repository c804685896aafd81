//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FlingkeyError, FlingkeyResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Swipe classification thresholds.
    pub gesture: GestureSettings,

    /// Motion tracking parameters used when replaying touch traces.
    pub tracker: TrackerSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Swipe classification thresholds.
///
/// Distances are in pixels, velocities in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Minimum displacement on the dominant axis.
    pub min_gesture_size: f64,

    /// Dominant/cross displacement ratio required for horizontal swipes.
    pub axis_dominance_ratio: f64,

    /// Dominant/cross displacement ratio required for vertical swipes.
    pub vertical_axis_dominance_ratio: f64,

    /// Minimum absolute horizontal release velocity.
    pub min_horizontal_velocity: f64,

    /// Minimum absolute vertical release velocity.
    pub min_vertical_velocity: f64,

    /// How much the vertical velocity must exceed the horizontal one.
    pub vertical_velocity_dominance_ratio: f64,
}

/// Motion tracking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Trailing window used to estimate release velocity (ms).
    pub velocity_horizon_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "flingkey=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            min_gesture_size: 100.0,
            axis_dominance_ratio: 1.5,
            vertical_axis_dominance_ratio: 2.5,
            min_horizontal_velocity: 1000.0,
            min_vertical_velocity: 1000.0,
            vertical_velocity_dominance_ratio: 2.5,
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            velocity_horizon_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GestureSettings {
    /// Check that every threshold is usable by the classifier.
    ///
    /// Sizes and velocities must be finite and non-negative; ratios must be
    /// finite and strictly positive.
    pub fn validate(&self) -> FlingkeyResult<()> {
        let non_negative = [
            ("min_gesture_size", self.min_gesture_size),
            ("min_horizontal_velocity", self.min_horizontal_velocity),
            ("min_vertical_velocity", self.min_vertical_velocity),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlingkeyError::config(format!(
                    "gesture.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        let ratios = [
            ("axis_dominance_ratio", self.axis_dominance_ratio),
            (
                "vertical_axis_dominance_ratio",
                self.vertical_axis_dominance_ratio,
            ),
            (
                "vertical_velocity_dominance_ratio",
                self.vertical_velocity_dominance_ratio,
            ),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlingkeyError::config(format!(
                    "gesture.{name} must be a finite positive ratio, got {value}"
                )));
            }
        }

        Ok(())
    }
}

impl TrackerSettings {
    pub fn validate(&self) -> FlingkeyResult<()> {
        if self.velocity_horizon_ms == 0 {
            return Err(FlingkeyError::config(
                "tracker.velocity_horizon_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// A missing file is not an error. A file that fails to load yields the
    /// defaults together with the error, so callers can report it once
    /// logging is up.
    pub fn load_or_default() -> (Self, Option<FlingkeyError>) {
        let config_path = config_file_path();
        if !config_path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(&config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> FlingkeyResult<Self> {
        if !path.exists() {
            return Err(FlingkeyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> FlingkeyResult<()> {
        self.gesture.validate()?;
        self.tracker.validate()
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> FlingkeyResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("flingkey").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flingkey-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults_match_keyboard_thresholds() {
        let gesture = GestureSettings::default();
        assert_eq!(gesture.min_gesture_size, 100.0);
        assert_eq!(gesture.axis_dominance_ratio, 1.5);
        assert_eq!(gesture.vertical_axis_dominance_ratio, 2.5);
        assert_eq!(gesture.min_horizontal_velocity, 1000.0);
        assert_eq!(gesture.min_vertical_velocity, 1000.0);
        assert_eq!(gesture.vertical_velocity_dominance_ratio, 2.5);
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let raw = r#"{ "gesture": { "min_gesture_size": 60.0 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.gesture.min_gesture_size, 60.0);
        assert_eq!(config.gesture.axis_dominance_ratio, 1.5);
        assert_eq!(config.tracker.velocity_horizon_ms, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let mut gesture = GestureSettings::default();
        gesture.axis_dominance_ratio = 0.0;
        assert!(matches!(
            gesture.validate(),
            Err(FlingkeyError::Config { .. })
        ));

        let mut gesture = GestureSettings::default();
        gesture.min_vertical_velocity = f64::NAN;
        assert!(gesture.validate().is_err());

        let mut gesture = GestureSettings::default();
        gesture.min_gesture_size = -1.0;
        assert!(gesture.validate().is_err());

        let tracker = TrackerSettings {
            velocity_horizon_ms: 0,
        };
        assert!(tracker.validate().is_err());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let path = temp_path("config.json");
        let mut config = AppConfig::default();
        config.gesture.min_gesture_size = 80.0;
        config.logging.json = true;

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_missing_path() {
        let path = temp_path("does-not-exist.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(FlingkeyError::FileNotFound { .. })
        ));
    }
}
