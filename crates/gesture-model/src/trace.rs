//! Recorded touch streams.
//!
//! A trace is a JSONL file: an optional `# {header}` comment line followed by
//! one [`TouchEvent`] per line, ordered by timestamp.

use std::path::Path;

use serde::{Deserialize, Serialize};

use flingkey_common::error::{FlingkeyError, FlingkeyResult};

use crate::sample::MotionSample;

/// Monotonic timestamp in nanoseconds since the trace started.
pub type TimestampNs = u64;

/// Current trace schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Phase of a touch pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single timestamped touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(rename = "type")]
    pub phase: TouchPhase,

    /// Surface X coordinate in pixels.
    pub x: f64,
    /// Surface Y coordinate in pixels.
    pub y: f64,
}

/// Trace metadata written as the first comment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the trace was recorded (RFC 3339).
    pub recorded_at: String,

    /// Touch surface dimensions in pixels.
    pub surface_width: u32,
    pub surface_height: u32,

    /// Display density (pixels per density-independent pixel).
    #[serde(default = "default_density")]
    pub density: f64,
}

fn default_density() -> f64 {
    1.0
}

impl TouchEvent {
    pub fn new(timestamp_ns: TimestampNs, phase: TouchPhase, x: f64, y: f64) -> Self {
        Self {
            timestamp_ns,
            phase,
            x,
            y,
        }
    }

    pub fn down(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self::new(timestamp_ns, TouchPhase::Down, x, y)
    }

    pub fn moved(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self::new(timestamp_ns, TouchPhase::Move, x, y)
    }

    pub fn up(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self::new(timestamp_ns, TouchPhase::Up, x, y)
    }

    pub fn cancel(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self::new(timestamp_ns, TouchPhase::Cancel, x, y)
    }

    /// Position of this event.
    pub fn sample(&self) -> MotionSample {
        MotionSample::new(self.x, self.y)
    }
}

impl TraceHeader {
    /// Parse a header from a `# {json}` comment line.
    pub fn from_comment(line: &str) -> Option<Self> {
        let body = line.trim().strip_prefix('#')?;
        serde_json::from_str(body.trim()).ok()
    }

    /// Render the header as a comment line (without trailing newline).
    pub fn to_comment(&self) -> Result<String, serde_json::Error> {
        Ok(format!("# {}", serde_json::to_string(self)?))
    }
}

/// Parse touch events from JSONL content, skipping blank and `#` lines.
///
/// Errors name the 1-based line of the input that failed.
pub fn parse_trace(jsonl: &str) -> FlingkeyResult<Vec<TouchEvent>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line)
                .map_err(|e| FlingkeyError::trace(format!("line {line_no}: {e}")))
        })
        .collect()
}

/// Serialize touch events to JSONL, one event per line.
pub fn serialize_trace(
    header: Option<&TraceHeader>,
    events: &[TouchEvent],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str(&header.to_comment()?);
        output.push('\n');
    }
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

/// Check that every coordinate is finite and timestamps never go backwards.
pub fn validate_trace(events: &[TouchEvent]) -> FlingkeyResult<()> {
    let mut prev_ts = None;
    for (index, event) in events.iter().enumerate() {
        event.sample().validate().map_err(|e| {
            FlingkeyError::trace(format!("event {index} has an invalid position: {e}"))
        })?;
        if let Some(prev) = prev_ts {
            if event.timestamp_ns < prev {
                return Err(FlingkeyError::trace(format!(
                    "event {index} goes back in time ({} < {prev})",
                    event.timestamp_ns
                )));
            }
        }
        prev_ts = Some(event.timestamp_ns);
    }
    Ok(())
}

/// A parsed trace file.
#[derive(Debug, Clone)]
pub struct LoadedTrace {
    pub header: Option<TraceHeader>,
    pub events: Vec<TouchEvent>,
}

impl LoadedTrace {
    /// Read, parse, and validate a trace file.
    pub fn load(path: &Path) -> FlingkeyResult<Self> {
        if !path.exists() {
            return Err(FlingkeyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let header = content
            .lines()
            .find(|line| !line.trim().is_empty())
            .and_then(TraceHeader::from_comment);

        if let Some(header) = &header {
            if header.schema_version != TRACE_SCHEMA_VERSION {
                tracing::warn!(
                    version = %header.schema_version,
                    "Trace schema version differs from {TRACE_SCHEMA_VERSION}"
                );
            }
        }

        let events = parse_trace(&content)?;
        validate_trace(&events)?;
        tracing::debug!(path = %path.display(), events = events.len(), "Loaded touch trace");

        Ok(Self { header, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> TraceHeader {
        TraceHeader {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            recorded_at: "2026-01-01T00:00:00Z".to_string(),
            surface_width: 1080,
            surface_height: 720,
            density: 2.0,
        }
    }

    #[test]
    fn test_json_format() {
        let event = TouchEvent::down(16_000_000, 120.5, 300.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":16000000"));
        assert!(json.contains("\"type\":\"down\""));
        assert!(json.contains("\"x\":120.5"));
    }

    #[test]
    fn test_trace_with_header() {
        let events = vec![
            TouchEvent::down(0, 100.0, 100.0),
            TouchEvent::moved(16_000_000, 150.0, 102.0),
            TouchEvent::up(32_000_000, 260.0, 104.0),
        ];
        let jsonl = serialize_trace(Some(&header()), &events).unwrap();
        assert!(jsonl.starts_with("# {"));

        let first = jsonl.lines().next().unwrap();
        assert_eq!(TraceHeader::from_comment(first), Some(header()));
        assert_eq!(parse_trace(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_header_density_defaults() {
        let line = r##"# {"schema_version":"1.0","recorded_at":"x","surface_width":10,"surface_height":20}"##;
        let parsed = TraceHeader::from_comment(line).unwrap();
        assert_eq!(parsed.density, 1.0);
        assert_eq!(TraceHeader::from_comment("{\"t\":0}"), None);
    }

    #[test]
    fn test_parse_error_names_source_line() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n\
                     {\"t\":0,\"type\":\"down\",\"x\":1.0,\"y\":2.0}\n\
                     \n\
                     {\"t\":5,\"type\":\"sideways\",\"x\":1.0,\"y\":2.0}\n";
        let err = parse_trace(jsonl).unwrap_err();
        assert!(matches!(err, FlingkeyError::Trace { .. }));
        let message = err.to_string();
        assert!(message.contains("line 4:"), "{message}");
    }

    #[test]
    fn test_validate_trace_rejects_time_travel() {
        let events = vec![
            TouchEvent::down(50, 0.0, 0.0),
            TouchEvent::up(10, 0.0, 0.0),
        ];
        let err = validate_trace(&events).unwrap_err();
        assert!(matches!(err, FlingkeyError::Trace { .. }));
    }

    #[test]
    fn test_validate_trace_rejects_non_finite() {
        let events = vec![TouchEvent::down(0, f64::NAN, 0.0)];
        assert!(validate_trace(&events).is_err());
    }

    #[test]
    fn test_load_trace_file() {
        let dir = std::env::temp_dir().join(format!("flingkey-trace-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("trace.jsonl");

        let events = vec![
            TouchEvent::down(0, 10.0, 10.0),
            TouchEvent::cancel(5_000_000, 12.0, 10.0),
        ];
        std::fs::write(&path, serialize_trace(Some(&header()), &events).unwrap()).unwrap();

        let loaded = LoadedTrace::load(&path).unwrap();
        assert_eq!(loaded.header, Some(header()));
        assert_eq!(loaded.events, events);

        std::fs::remove_file(&path).ok();
        assert!(matches!(
            LoadedTrace::load(&path),
            Err(FlingkeyError::FileNotFound { .. })
        ));
    }
}
