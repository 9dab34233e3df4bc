//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a rate card
//! from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ArrangementKey, ResourceType, Role};

use super::types::{RateCard, RateCardMetadata, RolesConfig};

/// Loads and provides access to a rate card.
///
/// # Directory Structure
///
/// ```text
/// config/rate_card/
/// ├── rate_card.yaml   # Card metadata
/// └── roles.yaml       # Roles and their arrangement tables
/// ```
///
/// # Example
///
/// ```no_run
/// use rate_engine::config::ConfigLoader;
/// use rate_engine::models::{ArrangementKey, ResourceType};
///
/// let loader = ConfigLoader::load("./config/rate_card").unwrap();
/// let rate = loader.resolve_rate(
///     "Senior Developer",
///     ArrangementKey::OnSiteUk,
///     Some(ResourceType::Acr),
/// );
/// println!("Inherited rate: {:?}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    card: RateCard,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or a role name is blank or
    ///   duplicated (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RateCardMetadata>(&path.join("rate_card.yaml"))?;

        let roles_path = path.join("roles.yaml");
        let roles_config = Self::load_yaml::<RolesConfig>(&roles_path)?;

        let card = RateCard::new(metadata, roles_config.roles).map_err(|e| {
            EngineError::ConfigParseError {
                path: roles_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        info!(
            code = %card.metadata().code,
            version = %card.metadata().version,
            roles = card.roles().len(),
            "Rate card loaded"
        );

        Ok(Self { card })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rate card.
    pub fn card(&self) -> &RateCard {
        &self.card
    }

    /// Returns the rate card metadata.
    pub fn metadata(&self) -> &RateCardMetadata {
        self.card.metadata()
    }

    /// Gets a role by its name.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the role is not on the card.
    pub fn get_role(&self, name: &str) -> EngineResult<&Role> {
        self.card.get_role(name)
    }

    /// Resolves the rate a resource inherits. See [`RateCard::resolve_rate`].
    pub fn resolve_rate(
        &self,
        role: &str,
        arrangement: ArrangementKey,
        resource_type: Option<ResourceType>,
    ) -> Option<Decimal> {
        self.card.resolve_rate(role, arrangement, resource_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_basic_rate;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/rate_card"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "RC-2024-01");
        assert_eq!(loader.metadata().currency, "USD");
        assert_eq!(loader.card().roles().len(), 3);
    }

    #[test]
    fn test_every_role_has_all_six_arrangements() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        for role in loader.card().roles() {
            for key in ArrangementKey::ALL {
                assert!(
                    role.rates(key).is_some(),
                    "{} is missing {}",
                    role.name,
                    key
                );
            }
        }
    }

    #[test]
    fn test_get_role() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let role = loader.get_role("Project Manager").unwrap();
        let rates = role.rates(ArrangementKey::OnSiteUk).unwrap();
        assert_eq!(rates.day_rate, dec("950"));
        assert_eq!(rates.saiven, dec("900"));
        assert_eq!(rates.bau, dec("870"));
    }

    #[test]
    fn test_get_role_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_role("unknown") {
            Err(EngineError::RoleNotFound { name }) => assert_eq!(name, "unknown"),
            other => panic!("Expected RoleNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rate_for_each_resource_type() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let key = ArrangementKey::WfmRemoteFlexibleUk;

        assert_eq!(
            loader.resolve_rate("Senior Developer", key, Some(ResourceType::Cir)),
            Some(dec("800"))
        );
        assert_eq!(
            loader.resolve_rate("Senior Developer", key, Some(ResourceType::Acr)),
            Some(dec("750"))
        );
        assert_eq!(
            loader.resolve_rate("Senior Developer", key, Some(ResourceType::Reference)),
            Some(dec("720"))
        );
    }

    #[test]
    fn test_resolve_rate_matches_stored_fields_for_every_pair() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        for role in loader.card().roles() {
            for (key, rates) in &role.arrangements {
                assert_eq!(
                    loader.resolve_rate(&role.name, *key, Some(ResourceType::Cir)),
                    Some(rates.day_rate)
                );
                assert_eq!(
                    loader.resolve_rate(&role.name, *key, Some(ResourceType::Acr)),
                    Some(rates.saiven)
                );
                assert_eq!(
                    loader.resolve_rate(&role.name, *key, Some(ResourceType::Reference)),
                    Some(rates.bau)
                );
            }
        }
    }

    #[test]
    fn test_stored_basic_rate_drifts_from_computed() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader
            .get_role("Senior Developer")
            .unwrap()
            .rates(ArrangementKey::WfmRemoteFlexibleUk)
            .unwrap();

        assert_eq!(rates.basic_rate, dec("650"));
        assert_eq!(compute_basic_rate(rates).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rate_card.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
