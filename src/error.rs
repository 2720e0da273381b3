//! Error types for u-timetable.
//!
//! Detected conflicts are not errors; they are returned as data. This
//! type covers failures to load or interpret input.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for u-timetable operations.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Reading an input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input JSON could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Engine configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data required for the requested operation is absent.
    #[error("Missing data: {}", .0.join("; "))]
    MissingData(Vec<String>),

    /// Input is structurally invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for u-timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
