//! Costing result models for the rate engine.
//!
//! This module contains the [`ResourceCosting`] type and its audit trace,
//! which together record how a resource's daily rate, earnings and profit
//! were reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ArrangementKey, RateField, ResourceType};

/// Where the applied daily rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Typed in on the resource form.
    Manual,
    /// Inherited from the role's arrangement rate card.
    Inherited,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are valid but probably not what the user
/// intended, such as a negative profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a costing.
///
/// # Example
///
/// ```
/// use rate_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The inheritance lookup that was attempted for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritedRate {
    /// Role name looked up.
    pub role: String,
    /// Arrangement looked up.
    pub work_arrangement: Option<ArrangementKey>,
    /// Resource type used to pick the field.
    pub resource_type: Option<ResourceType>,
    /// The field the rate was read from.
    pub field: RateField,
    /// The inherited rate, if the role and arrangement exist.
    pub rate: Option<Decimal>,
}

/// The complete result of costing a resource assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCosting {
    /// Unique identifier for this costing.
    pub costing_id: Uuid,
    /// When the costing was produced.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// The inheritance lookup.
    pub inherited: InheritedRate,
    /// The daily rate applied.
    pub daily_rate: Decimal,
    /// Whether `daily_rate` was typed in or inherited.
    pub rate_source: RateSource,
    /// The undiscounted day rate profit is measured against.
    pub expected_rate: Decimal,
    /// Billable days.
    pub working_days: Decimal,
    /// `daily_rate * working_days`.
    pub earnings: Decimal,
    /// `(expected_rate - daily_rate) * working_days`.
    pub profit: Decimal,
    /// How the figures were reached.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RateSource::Inherited).unwrap(),
            "\"inherited\""
        );
        assert_eq!(
            serde_json::to_string(&RateSource::Manual).unwrap(),
            "\"manual\""
        );
    }

    #[test]
    fn test_audit_step_serializes_json_payloads() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "earnings".to_string(),
            rule_name: "Earnings".to_string(),
            input: serde_json::json!({"daily_rate": "650"}),
            output: serde_json::json!({"earnings": "78000"}),
            reasoning: "$650 x 120 = $78000".to_string(),
        };

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["input"]["daily_rate"], "650");
        assert_eq!(value["output"]["earnings"], "78000");
        assert_eq!(value["step_number"], 1);
    }
}
