//! The standalone rate calculator.
//!
//! This formula set is independent of the rate card. Unlike
//! [`compute_basic_rate`](super::compute_basic_rate) it does not clamp, so a
//! submitted day rate below the fixed overhead produces negative results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Fixed overhead subtracted from the submitted day rate.
pub fn fixed_overhead() -> Decimal {
    Decimal::new(150, 0)
}

/// Divisor applied to the day rate above the overhead before taking tolerance.
pub fn loading_divisor() -> Decimal {
    Decimal::new(125, 2)
}

/// Share of the unloaded rate kept as tolerance (5%).
pub fn tolerance_share() -> Decimal {
    Decimal::new(5, 2)
}

/// Uplift applied to the spectrum rate to get the ACR and CIR rates.
pub fn spectrum_uplift() -> Decimal {
    Decimal::new(12, 1)
}

/// Results shown by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorOutputs {
    /// `(submitted_day_rate - 150) / 1.25 * 0.05`
    pub tolerance: Decimal,
    /// `submitted_day_rate - (150 + tolerance)`
    pub basic_rate: Decimal,
    /// `spectrum * 1.2`
    pub acr_rate: Decimal,
    /// `spectrum * 1.2`
    pub cir_rate: Decimal,
}

/// Runs the calculator formulas.
///
/// # Errors
///
/// Returns `ValidationError` naming the output whose arithmetic overflows.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::compute_calculator_outputs;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let out = compute_calculator_outputs(Decimal::new(3264, 0), Decimal::new(650, 0)).unwrap();
/// assert_eq!(out.tolerance, Decimal::from_str("124.56").unwrap());
/// assert_eq!(out.basic_rate, Decimal::from_str("2989.44").unwrap());
/// assert_eq!(out.acr_rate, Decimal::new(780, 0));
/// assert_eq!(out.cir_rate, Decimal::new(780, 0));
/// ```
pub fn compute_calculator_outputs(
    submitted_day_rate: Decimal,
    spectrum: Decimal,
) -> EngineResult<CalculatorOutputs> {
    let out_of_range = |field: &str| EngineError::validation(field, "is out of range");

    let tolerance = submitted_day_rate
        .checked_sub(fixed_overhead())
        .and_then(|above| above.checked_div(loading_divisor()))
        .and_then(|unloaded| unloaded.checked_mul(tolerance_share()))
        .ok_or_else(|| out_of_range("tolerance"))?;
    let basic_rate = fixed_overhead()
        .checked_add(tolerance)
        .and_then(|kept| submitted_day_rate.checked_sub(kept))
        .ok_or_else(|| out_of_range("basic_rate"))?;
    let uplifted = spectrum
        .checked_mul(spectrum_uplift())
        .ok_or_else(|| out_of_range("acr_rate"))?;

    Ok(CalculatorOutputs {
        tolerance,
        basic_rate,
        acr_rate: uplifted,
        cir_rate: uplifted,
    })
}

/// Every input the calculator page collects.
///
/// Only `submitted_day_rate` and `spectrum` take part in the formulas. The
/// other six are carried so the form state round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    /// Day rate submitted to the client.
    pub submitted_day_rate: Decimal,
    /// MCIR/CRM amount.
    pub mcir_crm: Decimal,
    /// Near-delivery amount.
    pub near_delivery: Decimal,
    /// Seven amount.
    pub seven: Decimal,
    /// DAB amount.
    pub dab: Decimal,
    /// Spectrum rate.
    pub spectrum: Decimal,
    /// WB amount.
    pub wb: Decimal,
    /// BAU amount.
    pub bau: Decimal,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            submitted_day_rate: Decimal::new(3264, 0),
            mcir_crm: Decimal::new(1000, 0),
            near_delivery: Decimal::new(1000, 0),
            seven: Decimal::new(150, 0),
            dab: Decimal::new(150, 0),
            spectrum: Decimal::new(650, 0),
            wb: Decimal::new(650, 0),
            bau: Decimal::new(650, 0),
        }
    }
}

impl CalculatorInputs {
    /// Runs the formulas over these inputs.
    ///
    /// # Errors
    ///
    /// See [`compute_calculator_outputs`].
    pub fn outputs(&self) -> EngineResult<CalculatorOutputs> {
        compute_calculator_outputs(self.submitted_day_rate, self.spectrum)
    }
}
