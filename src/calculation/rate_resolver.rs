//! Rate inheritance.
//!
//! A resource inherits its daily rate from the rate card of its role under
//! its work arrangement. Which field it inherits depends on its type:
//! CIR takes the day rate, ACR takes Saiven, Reference takes BAU.

use rust_decimal::Decimal;

use crate::models::{ArrangementKey, RateField, ResourceType, Role};

/// The field a resource type inherits, with day rate for an unknown type.
pub fn inherited_field(resource_type: Option<ResourceType>) -> RateField {
    resource_type.map_or(RateField::DayRate, ResourceType::inherited_field)
}

/// Looks up the rate a resource inherits.
///
/// Returns `None` when the role is not offered under the arrangement. That
/// is an expected outcome: the rate is then left for manual entry.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::resolve_rate;
/// use rate_engine::models::{ArrangementKey, ResourceType, Role, WorkArrangementRates};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut arrangements = BTreeMap::new();
/// arrangements.insert(
///     ArrangementKey::OnSiteUk,
///     WorkArrangementRates {
///         day_rate: Decimal::new(850, 0),
///         saiven: Decimal::new(800, 0),
///         bau: Decimal::new(770, 0),
///         ..Default::default()
///     },
/// );
/// let role = Role {
///     name: "Senior Developer".to_string(),
///     specification: String::new(),
///     arrangements,
/// };
///
/// assert_eq!(
///     resolve_rate(&role, ArrangementKey::OnSiteUk, Some(ResourceType::Acr)),
///     Some(Decimal::new(800, 0))
/// );
/// assert_eq!(resolve_rate(&role, ArrangementKey::RemoteUk, None), None);
/// ```
pub fn resolve_rate(
    role: &Role,
    arrangement: ArrangementKey,
    resource_type: Option<ResourceType>,
) -> Option<Decimal> {
    role.rates(arrangement)
        .map(|rates| rates.get(inherited_field(resource_type)))
}
