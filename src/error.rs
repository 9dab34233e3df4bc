//! Error types for the rate engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a rate card or
//! costing a resource.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the rate engine.
///
/// Note that a rate lookup that finds nothing is not an error: the
/// resolver returns `None` and callers fall back to manual entry.
///
/// # Example
///
/// ```
/// use rate_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
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

    /// A role was requested by name and is not on the rate card.
    #[error("Role not found: {name}")]
    RoleNotFound {
        /// The role name that was not found.
        name: String,
    },

    /// A label did not name one of the fixed work arrangements.
    #[error("Unknown work arrangement: {label}")]
    UnknownArrangement {
        /// The label that failed to parse.
        label: String,
    },

    /// An input value was missing, non-numeric, non-finite or inconsistent.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An attendance mark could not be applied.
    #[error("Invalid attendance on {date}: {message}")]
    InvalidAttendance {
        /// The (first) date the mark applies to.
        date: NaiveDate,
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
