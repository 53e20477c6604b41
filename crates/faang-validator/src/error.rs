//! Error types for the FAANG validator library.
//!
//! Validation findings are never errors: a record that breaks a rule produces
//! a [`ValidationOutcome`](crate::ValidationOutcome). This type covers the
//! things that stop a run from happening at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for validator operations.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input held no records to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The requested sample kind has no rule set.
    #[error("Unknown sample kind: {0}")]
    UnknownSampleKind(String),

    /// The run was cancelled by its caller.
    #[error("Validation cancelled after {completed} of {total} records")]
    Cancelled { completed: usize, total: usize },
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;
