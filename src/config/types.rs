//! Configuration types for the rate card.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML rate card files, and the [`RateCard`] that indexes them.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::resolve_rate;
use crate::error::{EngineError, EngineResult};
use crate::models::{ArrangementKey, ResourceType, Role};

/// Metadata about the rate card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCardMetadata {
    /// Short identifier for this card (e.g., "RC-2024-01").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date.
    pub version: String,
    /// ISO currency code the rates are quoted in.
    pub currency: String,
}

/// Structure of `roles.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Every priced role.
    pub roles: Vec<Role>,
}

/// The complete rate card: every role and its arrangement tables.
///
/// Roles keep the order they were declared in.
#[derive(Debug, Clone)]
pub struct RateCard {
    metadata: RateCardMetadata,
    roles: Vec<Role>,
    by_name: HashMap<String, usize>,
}

impl RateCard {
    /// Builds a rate card.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a role name is blank or appears twice.
    pub fn new(metadata: RateCardMetadata, roles: Vec<Role>) -> EngineResult<Self> {
        let mut by_name = HashMap::with_capacity(roles.len());
        for (index, role) in roles.iter().enumerate() {
            if role.name.trim().is_empty() {
                return Err(EngineError::validation(
                    "roles",
                    format!("role #{} has a blank name", index + 1),
                ));
            }
            if by_name.insert(role.name.clone(), index).is_some() {
                return Err(EngineError::validation(
                    "roles",
                    format!("duplicate role '{}'", role.name),
                ));
            }
        }

        Ok(Self {
            metadata,
            roles,
            by_name,
        })
    }

    /// Returns the rate card metadata.
    pub fn metadata(&self) -> &RateCardMetadata {
        &self.metadata
    }

    /// Returns all roles in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Looks up a role by exact name.
    pub fn find_role(&self, name: &str) -> Option<&Role> {
        self.by_name.get(name).map(|index| &self.roles[*index])
    }

    /// Looks up a role by exact name, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if no role has that name.
    pub fn get_role(&self, name: &str) -> EngineResult<&Role> {
        self.find_role(name).ok_or_else(|| EngineError::RoleNotFound {
            name: name.to_string(),
        })
    }

    /// Resolves the rate a resource inherits. `None` means nothing to inherit.
    pub fn resolve_rate(
        &self,
        role: &str,
        arrangement: ArrangementKey,
        resource_type: Option<ResourceType>,
    ) -> Option<Decimal> {
        resolve_rate(self.find_role(role)?, arrangement, resource_type)
    }

    /// Resolves a rate from UI labels.
    ///
    /// An unknown arrangement label yields `None`, the same as a missing
    /// role; an unknown resource type label falls back to the day rate.
    pub fn resolve_rate_by_label(
        &self,
        role: &str,
        arrangement: &str,
        resource_type: &str,
    ) -> Option<Decimal> {
        let arrangement = arrangement.parse::<ArrangementKey>().ok()?;
        self.resolve_rate(role, arrangement, ResourceType::from_label(resource_type))
    }
}
