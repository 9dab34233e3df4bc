//! Calculation logic for the rate engine.
//!
//! This module contains the pure rate functions (rate inheritance, basic
//! rate, earnings and profit, the standalone calculator), the resource
//! costing flow built on them, and project roll-ups.

mod basic_rate;
mod earnings;
mod parsing;
mod project_summary;
mod rate_calculator;
mod rate_resolver;
mod resource_costing;

pub use basic_rate::{compute_basic_rate, total_deductions};
pub use earnings::{compute_earnings, compute_profit};
pub use parsing::{FormValue, amount_from_f64, parse_amount, parse_lenient};
pub use project_summary::{
    ProjectSortKey, ProjectSummary, ResourceSortKey, sort_projects, sort_resources,
    summarize_project,
};
pub use rate_calculator::{
    CalculatorInputs, CalculatorOutputs, compute_calculator_outputs, fixed_overhead,
    loading_divisor, spectrum_uplift, tolerance_share,
};
pub use rate_resolver::{inherited_field, resolve_rate};
pub use resource_costing::{cost_resource, create_resource};
