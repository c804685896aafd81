//! Classify a single fling.

use std::path::PathBuf;

use flingkey_common::config::AppConfig;
use flingkey_gesture_model::{AnchorLocator, GestureResult, MotionSample, VelocityVector};

use super::{build_classifier, load_layout, ThresholdArgs};

pub fn run(
    config: &AppConfig,
    overrides: &ThresholdArgs,
    down: (f64, f64),
    up: (f64, f64),
    velocity: (f64, f64),
    layout: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = build_classifier(config, overrides)?;
    let layout = load_layout(layout)?;

    let down = MotionSample::new(down.0, down.1);
    let up = MotionSample::new(up.0, up.1);
    let velocity = VelocityVector::new(velocity.0, velocity.1);

    let anchor = layout
        .as_ref()
        .and_then(|l| l.locate(down))
        .map(|key| key.code);

    let result: GestureResult<String> = classifier
        .try_classify(down, up, velocity, anchor)
        .map_err(|e| anyhow::anyhow!("Cannot classify: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let (dx, dy) = down.delta_to(&up);
    println!("Gesture: {}", result.label());
    println!("  Displacement: dx={dx:.1} dy={dy:.1}");
    println!("  Velocity: vx={:.1} vy={:.1}", velocity.vx, velocity.vy);
    if let Some(code) = result.anchor() {
        println!("  Anchor: {code}");
    }
    if matches!(result, GestureResult::Ambiguous) {
        println!("  Motion was gesture-sized but matched no direction.");
    }

    Ok(())
}
