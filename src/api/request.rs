//! Request types for the rate engine API.
//!
//! Numeric form values arrive as [`FormValue`]s so the engine can accept
//! what a form actually posts (text or JSON numbers) and validate it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CalculatorInputs, FormValue};
use crate::error::EngineResult;
use crate::models::{ArrangementKey, ResourceAssignment, ResourceType};

/// Request body for `POST /rates/resolve`.
///
/// Labels are matched the way the UI sends them: an unknown arrangement
/// resolves to no rate, an unknown resource type inherits the day rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRateRequest {
    /// Role name on the rate card.
    pub role: String,
    /// Arrangement label or key.
    pub work_arrangement: String,
    /// Resource type label ("CIR", "ACR", "Reference").
    #[serde(default)]
    pub resource_type: String,
}

/// Request body for `POST /calculator`.
///
/// Omitted inputs take the calculator's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorRequest {
    /// Day rate submitted to the client.
    pub submitted_day_rate: Option<FormValue>,
    /// MCIR/CRM amount.
    pub mcir_crm: Option<FormValue>,
    /// Near-delivery amount.
    pub near_delivery: Option<FormValue>,
    /// Seven amount.
    pub seven: Option<FormValue>,
    /// DAB amount.
    pub dab: Option<FormValue>,
    /// Spectrum rate.
    pub spectrum: Option<FormValue>,
    /// WB amount.
    pub wb: Option<FormValue>,
    /// BAU amount.
    pub bau: Option<FormValue>,
}

fn amount_or(value: &Option<FormValue>, field: &str, default: Decimal) -> EngineResult<Decimal> {
    match value {
        Some(value) => value.to_amount(field),
        None => Ok(default),
    }
}

impl CalculatorRequest {
    /// Validates every supplied input and fills in defaults for the rest.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a blank, non-numeric or non-finite input.
    pub fn into_inputs(self) -> EngineResult<CalculatorInputs> {
        let defaults = CalculatorInputs::default();
        Ok(CalculatorInputs {
            submitted_day_rate: amount_or(
                &self.submitted_day_rate,
                "submitted_day_rate",
                defaults.submitted_day_rate,
            )?,
            mcir_crm: amount_or(&self.mcir_crm, "mcir_crm", defaults.mcir_crm)?,
            near_delivery: amount_or(&self.near_delivery, "near_delivery", defaults.near_delivery)?,
            seven: amount_or(&self.seven, "seven", defaults.seven)?,
            dab: amount_or(&self.dab, "dab", defaults.dab)?,
            spectrum: amount_or(&self.spectrum, "spectrum", defaults.spectrum)?,
            wb: amount_or(&self.wb, "wb", defaults.wb)?,
            bau: amount_or(&self.bau, "bau", defaults.bau)?,
        })
    }
}

/// Request body for `POST /resources/cost`: the assignment step of the
/// resource form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostResourceRequest {
    /// Project the resource is assigned to.
    #[serde(default)]
    pub project: String,
    /// Role name on the rate card.
    pub role: String,
    /// Arrangement label or key. Blank means none chosen.
    #[serde(default)]
    pub work_arrangement: Option<String>,
    /// Resource type label. Blank means none chosen.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Manually entered daily rate. Blank means inherit.
    #[serde(default)]
    pub daily_rate: Option<FormValue>,
    /// Number of billable days.
    pub working_days: FormValue,
    /// Assignment start date.
    pub start_date: NaiveDate,
    /// Assignment end date.
    pub end_date: NaiveDate,
    /// Free-text skills.
    #[serde(default)]
    pub skills: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CostResourceRequest {
    /// Validates the form and converts it to a [`ResourceAssignment`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownArrangement` for an arrangement label that is not one
    /// of the six, and `ValidationError` for bad numbers.
    pub fn into_assignment(self) -> EngineResult<ResourceAssignment> {
        let work_arrangement = non_blank(&self.work_arrangement)
            .map(str::parse::<ArrangementKey>)
            .transpose()?;
        let resource_type = non_blank(&self.resource_type).and_then(ResourceType::from_label);
        let daily_rate = match &self.daily_rate {
            Some(value) => value.to_optional_amount("daily_rate")?,
            None => None,
        };
        let working_days = self.working_days.to_amount("working_days")?;

        Ok(ResourceAssignment {
            project: self.project,
            role: self.role,
            work_arrangement,
            resource_type,
            daily_rate,
            working_days,
            start_date: self.start_date,
            end_date: self.end_date,
            skills: self.skills,
        })
    }
}
