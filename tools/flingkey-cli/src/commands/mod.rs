//! Subcommand implementations and the options they share.

use std::path::PathBuf;

use clap::Args;

use flingkey_common::config::{AppConfig, GestureSettings};
use flingkey_gesture_core::GestureClassifier;
use flingkey_gesture_model::KeyLayout;

pub mod classify;
pub mod config;
pub mod replay;

/// Per-run threshold overrides applied on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Minimum displacement on the dominant axis (px)
    #[arg(long)]
    pub min_gesture_size: Option<f64>,

    /// Displacement ratio required for horizontal swipes
    #[arg(long)]
    pub axis_ratio: Option<f64>,

    /// Displacement ratio required for vertical swipes
    #[arg(long)]
    pub vertical_axis_ratio: Option<f64>,

    /// Minimum horizontal release velocity (px/s)
    #[arg(long)]
    pub min_horizontal_velocity: Option<f64>,

    /// Minimum vertical release velocity (px/s)
    #[arg(long)]
    pub min_vertical_velocity: Option<f64>,

    /// Required |vy / vx| for vertical swipes
    #[arg(long)]
    pub vertical_velocity_ratio: Option<f64>,
}

impl ThresholdArgs {
    /// Overlay the overrides onto `settings`.
    pub fn apply(&self, settings: &GestureSettings) -> GestureSettings {
        GestureSettings {
            min_gesture_size: self.min_gesture_size.unwrap_or(settings.min_gesture_size),
            axis_dominance_ratio: self.axis_ratio.unwrap_or(settings.axis_dominance_ratio),
            vertical_axis_dominance_ratio: self
                .vertical_axis_ratio
                .unwrap_or(settings.vertical_axis_dominance_ratio),
            min_horizontal_velocity: self
                .min_horizontal_velocity
                .unwrap_or(settings.min_horizontal_velocity),
            min_vertical_velocity: self
                .min_vertical_velocity
                .unwrap_or(settings.min_vertical_velocity),
            vertical_velocity_dominance_ratio: self
                .vertical_velocity_ratio
                .unwrap_or(settings.vertical_velocity_dominance_ratio),
        }
    }
}

/// Build a classifier from config plus command-line overrides.
pub fn build_classifier(
    config: &AppConfig,
    overrides: &ThresholdArgs,
) -> anyhow::Result<GestureClassifier> {
    let settings = overrides.apply(&config.gesture);
    let classifier = GestureClassifier::from_settings(&settings)
        .map_err(|e| anyhow::anyhow!("Invalid thresholds: {e}"))?;
    tracing::debug!(thresholds = ?settings, "Using gesture thresholds");
    Ok(classifier)
}

/// Load an optional key layout.
pub fn load_layout(path: Option<PathBuf>) -> anyhow::Result<Option<KeyLayout>> {
    path.map(|p| {
        KeyLayout::load(&p)
            .map_err(|e| anyhow::anyhow!("Failed to load layout {}: {e}", p.display()))
    })
    .transpose()
}
