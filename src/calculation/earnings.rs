//! Earnings and profit for a resource assignment.
//!
//! Amounts come straight from form input, so every operation is checked and
//! a result too large for a `Decimal` is reported as a validation error.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

fn out_of_range(field: &str) -> EngineError {
    EngineError::validation(field, "is out of range")
}

/// Computes `daily_rate * working_days`.
///
/// # Errors
///
/// Returns `ValidationError` on `earnings` if the product overflows.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::compute_earnings;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     compute_earnings(Decimal::new(650, 0), Decimal::new(120, 0)).unwrap(),
///     Decimal::new(78000, 0)
/// );
/// ```
pub fn compute_earnings(daily_rate: Decimal, working_days: Decimal) -> EngineResult<Decimal> {
    daily_rate
        .checked_mul(working_days)
        .ok_or_else(|| out_of_range("earnings"))
}

/// Computes `(expected_rate - actual_rate) * working_days`.
///
/// `expected_rate` is the undiscounted day rate of the role and arrangement,
/// `actual_rate` the daily rate the resource is billed at. A resource billed
/// above the expected rate yields a negative profit.
///
/// # Errors
///
/// Returns `ValidationError` if either product or the difference overflows.
pub fn compute_profit(
    expected_rate: Decimal,
    actual_rate: Decimal,
    working_days: Decimal,
) -> EngineResult<Decimal> {
    let expected = expected_rate
        .checked_mul(working_days)
        .ok_or_else(|| out_of_range("profit"))?;
    let earnings = compute_earnings(actual_rate, working_days)?;
    expected
        .checked_sub(earnings)
        .ok_or_else(|| out_of_range("profit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// EP-001: 650 a day for 120 days
    #[test]
    fn test_earnings_for_650_over_120_days() {
        assert_eq!(compute_earnings(dec("650"), dec("120")).unwrap(), dec("78000"));
    }

    /// EP-002: discount against the day rate is profit
    #[test]
    fn test_profit_is_discount_times_days() {
        assert_eq!(
            compute_profit(dec("800"), dec("750"), dec("100")).unwrap(),
            dec("5000")
        );
    }

    /// EP-003: billing above the day rate is a loss
    #[test]
    fn test_billing_above_day_rate_is_negative_profit() {
        assert_eq!(
            compute_profit(dec("700"), dec("720"), dec("10")).unwrap(),
            dec("-200")
        );
    }

    #[test]
    fn test_fractional_days() {
        assert_eq!(compute_earnings(dec("650"), dec("0.5")).unwrap(), dec("325"));
    }

    /// EP-004: a product beyond the decimal range is rejected, not wrapped
    #[test]
    fn test_earnings_overflow_is_validation_error() {
        match compute_earnings(Decimal::MAX, dec("2")) {
            Err(EngineError::ValidationError { field, message }) => {
                assert_eq!(field, "earnings");
                assert_eq!(message, "is out of range");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_profit_overflow_is_validation_error() {
        match compute_profit(Decimal::MAX, Decimal::ZERO, dec("2")) {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "profit"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
        match compute_profit(Decimal::MAX, Decimal::MIN, Decimal::ONE) {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "profit"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_representable_earnings_is_accepted() {
        assert_eq!(compute_earnings(Decimal::MAX, Decimal::ONE).unwrap(), Decimal::MAX);
    }

    fn amount() -> impl Strategy<Value = Decimal> {
        (0i64..100_000i64, 0u32..3u32).prop_map(|(n, scale)| Decimal::new(n, scale))
    }

    fn any_amount() -> impl Strategy<Value = Decimal> {
        (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..6u32).prop_map(
            |(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale),
        )
    }

    proptest! {
        #[test]
        fn prop_earnings_is_pure(rate in amount(), days in amount()) {
            prop_assert_eq!(
                compute_earnings(rate, days).unwrap(),
                compute_earnings(rate, days).unwrap()
            );
        }

        #[test]
        fn prop_zero_rate_earns_nothing(days in amount()) {
            prop_assert_eq!(compute_earnings(Decimal::ZERO, days).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn prop_same_expected_and_actual_rate_is_zero_profit(rate in amount(), days in amount()) {
            prop_assert_eq!(compute_profit(rate, rate, days).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn prop_earnings_never_panics(rate in any_amount(), days in any_amount()) {
            let _ = compute_earnings(rate, days);
            let _ = compute_profit(rate, days, rate);
        }
    }
}
