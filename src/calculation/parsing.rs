//! Turning form input into amounts.
//!
//! Two policies exist side by side. Rate card fields are parsed leniently
//! (anything unreadable counts as zero), while amounts that feed earnings
//! and profit are parsed strictly and rejected with a `ValidationError`.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parses a form value, treating blank or unreadable input as zero.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::parse_lenient;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_lenient(" 42.5 "), Decimal::new(425, 1));
/// assert_eq!(parse_lenient(""), Decimal::ZERO);
/// assert_eq!(parse_lenient("n/a"), Decimal::ZERO);
/// ```
pub fn parse_lenient(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Parses a required amount.
///
/// # Errors
///
/// Returns `ValidationError` for blank input and for anything that is not a
/// finite decimal number (including `NaN` and `inf`).
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(field, "is required"));
    }
    Decimal::from_str(trimmed).map_err(|_| {
        EngineError::validation(field, format!("'{}' is not a finite number", trimmed))
    })
}

/// Converts a floating point amount.
///
/// # Errors
///
/// Returns `ValidationError` for `NaN`, infinities and values too large to
/// represent.
pub fn amount_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::validation(field, "must be a finite number"));
    }
    Decimal::from_f64(value).ok_or_else(|| EngineError::validation(field, "is out of range"))
}

/// A numeric form value that may arrive as text or as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// A JSON number.
    Number(f64),
    /// A string, exactly as typed.
    Text(String),
}

impl FormValue {
    /// Validates and converts the value.
    ///
    /// # Errors
    ///
    /// See [`parse_amount`] and [`amount_from_f64`].
    pub fn to_amount(&self, field: &str) -> EngineResult<Decimal> {
        match self {
            FormValue::Number(value) => amount_from_f64(field, *value),
            FormValue::Text(raw) => parse_amount(field, raw),
        }
    }

    /// Like [`FormValue::to_amount`], but blank text means "not entered".
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for non-blank input that is not a finite number.
    pub fn to_optional_amount(&self, field: &str) -> EngineResult<Option<Decimal>> {
        match self {
            FormValue::Text(raw) if raw.trim().is_empty() => Ok(None),
            other => other.to_amount(field).map(Some),
        }
    }
}

impl From<&str> for FormValue {
    fn from(raw: &str) -> Self {
        FormValue::Text(raw.to_string())
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}
