//! Replay a recorded touch trace through the classifier.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use flingkey_common::config::{AppConfig, GestureSettings, TrackerSettings};
use flingkey_gesture_core::{segment_trace, GestureClassifier, Stroke};
use flingkey_gesture_model::{
    AnchorLocator, GestureResult, KeyLayout, LoadedTrace, MotionSample, VelocityVector,
};

use super::{build_classifier, load_layout, ThresholdArgs};

#[derive(Debug, Serialize)]
struct ReplayReport {
    generated_at: String,
    trace: String,
    thresholds: GestureSettings,
    tracker: TrackerSettings,
    strokes: Vec<StrokeReport>,
    totals: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Serialize)]
struct StrokeReport {
    index: usize,
    start_secs: f64,
    duration_ms: f64,
    down: MotionSample,
    up: MotionSample,
    velocity: VelocityVector,
    result: GestureResult<String>,
}

pub fn run(
    config: &AppConfig,
    overrides: &ThresholdArgs,
    trace_path: PathBuf,
    layout: Option<PathBuf>,
    velocity_horizon_ms: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = build_classifier(config, overrides)?;
    let layout = load_layout(layout)?;

    let tracker = TrackerSettings {
        velocity_horizon_ms: velocity_horizon_ms.unwrap_or(config.tracker.velocity_horizon_ms),
    };
    tracker
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid tracker settings: {e}"))?;

    let trace = LoadedTrace::load(&trace_path)
        .map_err(|e| anyhow::anyhow!("Failed to load trace: {e}"))?;
    let strokes = segment_trace(&trace.events, &tracker);
    tracing::info!(
        events = trace.events.len(),
        strokes = strokes.len(),
        "Segmented touch trace"
    );

    let reports: Vec<StrokeReport> = strokes
        .iter()
        .enumerate()
        .map(|(index, stroke)| StrokeReport {
            index,
            start_secs: stroke.start_ns as f64 / 1_000_000_000.0,
            duration_ms: stroke.duration_ns() as f64 / 1_000_000.0,
            down: stroke.down,
            up: stroke.up,
            velocity: stroke.velocity,
            result: classify_stroke(&classifier, stroke, layout.as_ref()),
        })
        .collect();

    let mut totals: BTreeMap<&'static str, usize> = BTreeMap::new();
    for report in &reports {
        *totals.entry(report.result.label()).or_default() += 1;
    }

    if json {
        let report = ReplayReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            trace: trace_path.display().to_string(),
            thresholds: *classifier.thresholds(),
            tracker,
            strokes: reports,
            totals,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Replaying trace: {}", trace_path.display());
    if let Some(header) = &trace.header {
        println!(
            "  Surface: {}x{} @ {:.1}x (recorded {})",
            header.surface_width, header.surface_height, header.density, header.recorded_at
        );
    }
    println!("  Events: {}", trace.events.len());
    println!("  Strokes: {}\n", reports.len());

    for report in &reports {
        let anchor = report
            .result
            .anchor()
            .map(|code| format!(" [{code}]"))
            .unwrap_or_default();
        println!(
            "  #{:<3} t={:>8.3}s {:>6.1}ms  d=({:+.1}, {:+.1})  v=({:+.0}, {:+.0})  -> {}{}",
            report.index,
            report.start_secs,
            report.duration_ms,
            report.up.x - report.down.x,
            report.up.y - report.down.y,
            report.velocity.vx,
            report.velocity.vy,
            report.result.label(),
            anchor
        );
    }

    println!("\nTotals:");
    for (label, count) in &totals {
        println!("  {label}: {count}");
    }

    Ok(())
}

fn classify_stroke(
    classifier: &GestureClassifier,
    stroke: &Stroke,
    layout: Option<&KeyLayout>,
) -> GestureResult<String> {
    let anchor = layout
        .and_then(|l| l.locate(stroke.down))
        .map(|key| key.code);
    classifier.classify(stroke.down, stroke.up, stroke.velocity, anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flingkey_gesture_model::{KeyBounds, SwipeDirection};

    #[test]
    fn test_classify_stroke_resolves_key_code() {
        let layout = KeyLayout::new("one", vec![KeyBounds::new("KeyZ", 0.0, 0.0, 200.0, 200.0)]);
        let stroke = Stroke {
            down: MotionSample::new(150.0, 100.0),
            up: MotionSample::new(150.0, 400.0),
            velocity: VelocityVector::new(0.0, 3000.0),
            start_ns: 0,
            end_ns: 60_000_000,
        };
        let classifier = GestureClassifier::with_defaults();

        let result = classify_stroke(&classifier, &stroke, Some(&layout));
        assert_eq!(result.direction(), Some(SwipeDirection::Down));
        assert_eq!(result.anchor().map(String::as_str), Some("KeyZ"));

        let bare = classify_stroke(&classifier, &stroke, None);
        assert_eq!(bare.anchor(), None);
    }
}
