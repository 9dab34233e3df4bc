//! Basic rate calculation.
//!
//! The basic rate is what remains of the day rate once every deduction line
//! on the rate card has been taken off. It never goes below zero.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateField, WorkArrangementRates};

/// Sums the eleven deduction fields of a rate card.
///
/// # Errors
///
/// Returns `ValidationError` on `deductions` if the sum overflows.
pub fn total_deductions(rates: &WorkArrangementRates) -> EngineResult<Decimal> {
    RateField::DEDUCTIONS
        .iter()
        .try_fold(Decimal::ZERO, |total, field| {
            total.checked_add(rates.get(*field))
        })
        .ok_or_else(|| EngineError::validation("deductions", "is out of range"))
}

/// Computes `max(0, day_rate - total_deductions)`.
///
/// The stored `basic_rate` field is ignored.
///
/// # Errors
///
/// Returns `ValidationError` if the deductions or the difference overflow.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::compute_basic_rate;
/// use rate_engine::models::WorkArrangementRates;
/// use rust_decimal::Decimal;
///
/// let rates = WorkArrangementRates {
///     day_rate: Decimal::new(800, 0),
///     tolerance: Decimal::new(50, 0),
///     ws: Decimal::new(10, 0),
///     ..Default::default()
/// };
/// assert_eq!(compute_basic_rate(&rates).unwrap(), Decimal::new(740, 0));
/// ```
pub fn compute_basic_rate(rates: &WorkArrangementRates) -> EngineResult<Decimal> {
    let deductions = total_deductions(rates)?;
    let remaining = rates
        .day_rate
        .checked_sub(deductions)
        .ok_or_else(|| EngineError::validation("basic_rate", "is out of range"))?;
    Ok(remaining.max(Decimal::ZERO))
}
