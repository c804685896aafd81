//! Error types shared across Flingkey crates.

use std::path::PathBuf;

/// Top-level error type for Flingkey operations.
#[derive(Debug, thiserror::Error)]
pub enum FlingkeyError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FlingkeyError.
pub type FlingkeyResult<T> = Result<T, FlingkeyError>;

impl FlingkeyError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout {
            message: msg.into(),
        }
    }

    /// Reject a non-finite numeric field.
    pub fn ensure_finite(field: &str, value: f64) -> FlingkeyResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid_input(format!(
                "{field} must be finite, got {value}"
            )))
        }
    }
}
