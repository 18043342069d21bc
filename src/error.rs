//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the engine can report. None of them are transient:
//! the engine performs no I/O outside configuration loading, so callers should
//! surface these as validation messages rather than retry.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "base_salary".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'base_salary': must be greater than zero");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A caller-supplied argument was out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The argument or field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A rate could not be derived because its denominator is zero.
    ///
    /// Raised when a payroll period has no expected working days, which
    /// indicates a misconfigured schedule rather than a zero salary.
    #[error("Division undefined: {message}")]
    DivisionUndefined {
        /// A description of the undefined division.
        message: String,
    },

    /// An attendance record contained inconsistent data.
    #[error("Malformed attendance record for {date}: {message}")]
    MalformedRecord {
        /// The date of the offending record.
        date: NaiveDate,
        /// A description of what made the record malformed.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
