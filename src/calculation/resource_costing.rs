//! Costing a resource assignment end to end.
//!
//! This is the flow behind submitting the resource form: inherit a rate from
//! the rate card, settle on the daily rate actually billed, then derive
//! earnings and profit. Every decision is written to the audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::{compute_earnings, compute_profit, inherited_field};
use crate::config::RateCard;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, InheritedRate, PersonalDetails, RateSource, Resource,
    ResourceAssignment, ResourceCosting,
};

/// Costs a resource assignment against a rate card.
///
/// The manually entered daily rate wins; without one the inherited rate is
/// used. Profit is measured against the arrangement's day rate, or against
/// the applied rate itself when the role has no card for the arrangement.
///
/// # Errors
///
/// Returns `ValidationError` if:
/// - working days are negative
/// - the end date is before the start date
/// - no daily rate was entered and none could be inherited
/// - earnings or profit fall outside the decimal range
pub fn cost_resource(
    card: &RateCard,
    assignment: &ResourceAssignment,
) -> EngineResult<ResourceCosting> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    if assignment.working_days < Decimal::ZERO {
        return Err(EngineError::validation(
            "working_days",
            format!("must not be negative, got {}", assignment.working_days),
        ));
    }
    if assignment.end_date < assignment.start_date {
        return Err(EngineError::validation(
            "end_date",
            format!(
                "end date {} is before start date {}",
                assignment.end_date, assignment.start_date
            ),
        ));
    }

    // Step 1: inheritance lookup
    let field = inherited_field(assignment.resource_type);
    let arrangement_rates = assignment
        .work_arrangement
        .and_then(|key| card.find_role(&assignment.role)?.rates(key));
    let inherited_rate = arrangement_rates.map(|rates| rates.get(field));

    steps.push(AuditStep {
        step_number: 1,
        rule_id: "rate_inheritance".to_string(),
        rule_name: "Rate Inheritance".to_string(),
        input: serde_json::json!({
            "role": assignment.role,
            "work_arrangement": assignment.work_arrangement.map(|k| k.label()),
            "resource_type": assignment.resource_type.map(|t| t.label()),
        }),
        output: serde_json::json!({
            "field": field,
            "rate": inherited_rate.map(|r| r.to_string()),
        }),
        reasoning: match inherited_rate {
            Some(rate) => format!(
                "Role '{}' carries {:?} = ${} for this arrangement",
                assignment.role, field, rate
            ),
            None => format!(
                "Role '{}' has no rate card for the selected arrangement; nothing inherited",
                assignment.role
            ),
        },
    });

    // Step 2: daily rate selection
    let (daily_rate, rate_source) = match (assignment.daily_rate, inherited_rate) {
        (Some(manual), _) => (manual, RateSource::Manual),
        (None, Some(inherited)) => (inherited, RateSource::Inherited),
        (None, None) => {
            return Err(EngineError::validation(
                "daily_rate",
                "no daily rate entered and none could be inherited",
            ));
        }
    };

    if rate_source == RateSource::Manual && inherited_rate.is_none() {
        warnings.push(AuditWarning {
            code: "NO_INHERITED_RATE".to_string(),
            message: format!(
                "Role '{}' has no rate card for this arrangement; \
                 profit is measured against the manual rate",
                assignment.role
            ),
            severity: "low".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number: 2,
        rule_id: "daily_rate_selection".to_string(),
        rule_name: "Daily Rate Selection".to_string(),
        input: serde_json::json!({
            "manual_rate": assignment.daily_rate.map(|r| r.to_string()),
            "inherited_rate": inherited_rate.map(|r| r.to_string()),
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.to_string(),
            "source": rate_source,
        }),
        reasoning: match rate_source {
            RateSource::Manual => format!("Using manually entered rate ${}", daily_rate),
            RateSource::Inherited => format!("Using inherited rate ${}", daily_rate),
        },
    });

    // Step 3: earnings
    let earnings = compute_earnings(daily_rate, assignment.working_days)?;
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "earnings".to_string(),
        rule_name: "Earnings".to_string(),
        input: serde_json::json!({
            "daily_rate": daily_rate.to_string(),
            "working_days": assignment.working_days.to_string(),
        }),
        output: serde_json::json!({
            "earnings": earnings.to_string(),
        }),
        reasoning: format!(
            "${} x {} days = ${}",
            daily_rate.normalize(),
            assignment.working_days.normalize(),
            earnings.normalize()
        ),
    });

    // Step 4: profit against the undiscounted day rate
    let expected_rate = arrangement_rates.map_or(daily_rate, |rates| rates.day_rate);
    let profit = compute_profit(expected_rate, daily_rate, assignment.working_days)?;

    if profit < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_PROFIT".to_string(),
            message: format!(
                "Daily rate ${} is above the expected day rate ${}",
                daily_rate, expected_rate
            ),
            severity: "medium".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number: 4,
        rule_id: "profit".to_string(),
        rule_name: "Profit".to_string(),
        input: serde_json::json!({
            "expected_rate": expected_rate.to_string(),
            "daily_rate": daily_rate.to_string(),
            "working_days": assignment.working_days.to_string(),
        }),
        output: serde_json::json!({
            "profit": profit.to_string(),
        }),
        reasoning: format!(
            "(${} - ${}) x {} days = ${}",
            expected_rate.normalize(),
            daily_rate.normalize(),
            assignment.working_days.normalize(),
            profit.normalize()
        ),
    });

    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
    debug!(
        role = %assignment.role,
        daily_rate = %daily_rate,
        earnings = %earnings,
        profit = %profit,
        "Resource costed"
    );

    Ok(ResourceCosting {
        costing_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        inherited: InheritedRate {
            role: assignment.role.clone(),
            work_arrangement: assignment.work_arrangement,
            resource_type: assignment.resource_type,
            field,
            rate: inherited_rate,
        },
        daily_rate,
        rate_source,
        expected_rate,
        working_days: assignment.working_days,
        earnings,
        profit,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Validates a new resource and costs its assignment.
///
/// # Errors
///
/// Returns the first `ValidationError` from the personal details, then any
/// error from [`cost_resource`].
pub fn create_resource(
    card: &RateCard,
    id: impl Into<String>,
    personal: PersonalDetails,
    assignment: ResourceAssignment,
) -> EngineResult<Resource> {
    personal.validate()?;
    let costing = cost_resource(card, &assignment)?;

    Ok(Resource {
        id: id.into(),
        personal,
        assignment,
        daily_rate: costing.daily_rate,
        earnings: costing.earnings,
        profit: costing.profit,
    })
}
