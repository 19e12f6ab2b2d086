//! Error types for estimation and export.

use thiserror::Error;

/// Result type for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Reasons an input cannot be turned into an estimate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// A required numeric field is zero or negative.
    #[error("invalid input: `{field}` must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A numeric field is NaN or infinite.
    #[error("invalid input: `{field}` must be a finite number")]
    NonFinite { field: &'static str },

    /// A required field was never filled in.
    #[error("invalid input: `{field}` is required")]
    MissingField { field: &'static str },

    /// A derived quantity does not fit its output type.
    #[error("input out of range: `{field}` would be {value}, above the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

/// Failures while writing a report or comparison export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
