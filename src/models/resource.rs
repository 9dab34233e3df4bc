//! Resource (staff member) model and related types.
//!
//! This module defines the [`Resource`] struct together with the billing
//! category ([`ResourceType`]) that decides which rate a resource inherits.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArrangementKey, RateField};
use crate::error::{EngineError, EngineResult};

/// The billing category of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// Billed at the arrangement's day rate.
    #[serde(rename = "CIR")]
    Cir,
    /// Billed at the arrangement's Saiven rate.
    #[serde(rename = "ACR")]
    Acr,
    /// Billed at the arrangement's BAU rate.
    Reference,
}

impl ResourceType {
    /// Parses a UI label, ignoring case. Returns `None` for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use rate_engine::models::ResourceType;
    ///
    /// assert_eq!(ResourceType::from_label("acr"), Some(ResourceType::Acr));
    /// assert_eq!(ResourceType::from_label("Contractor"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "cir" => Some(ResourceType::Cir),
            "acr" => Some(ResourceType::Acr),
            "reference" => Some(ResourceType::Reference),
            _ => None,
        }
    }

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Cir => "CIR",
            ResourceType::Acr => "ACR",
            ResourceType::Reference => "Reference",
        }
    }

    /// The arrangement field a resource of this type inherits its rate from.
    pub fn inherited_field(self) -> RateField {
        match self {
            ResourceType::Cir => RateField::DayRate,
            ResourceType::Acr => RateField::Saiven,
            ResourceType::Reference => RateField::Bau,
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    /// A positive.
    #[serde(rename = "A+")]
    APositive,
    /// A negative.
    #[serde(rename = "A-")]
    ANegative,
    /// B positive.
    #[serde(rename = "B+")]
    BPositive,
    /// B negative.
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive.
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative.
    #[serde(rename = "AB-")]
    AbNegative,
    /// O positive.
    #[serde(rename = "O+")]
    OPositive,
    /// O negative.
    #[serde(rename = "O-")]
    ONegative,
}

/// Personal details collected on the first step of the resource form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Location (city, region).
    pub location: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Blood group, if recorded.
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    /// File name of the uploaded resume, if any.
    #[serde(default)]
    pub resume: Option<String>,
}

impl PersonalDetails {
    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first missing field.
    pub fn validate(&self) -> EngineResult<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EngineError::validation(field, "is required"));
            }
        }
        if self.date_of_birth.is_none() {
            return Err(EngineError::validation("date_of_birth", "is required"));
        }
        Ok(())
    }

    /// Age in whole years on the given date, if the date of birth is known.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        let mut years = date.year() - dob.year();
        if (date.month(), date.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// Where and how a resource is placed, collected on the second form step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    /// Project the resource is assigned to.
    pub project: String,
    /// Role name on the rate card.
    pub role: String,
    /// Work arrangement, if chosen.
    pub work_arrangement: Option<ArrangementKey>,
    /// Billing category. `None` behaves like CIR when inheriting.
    pub resource_type: Option<ResourceType>,
    /// Manually entered daily rate. `None` means inherit from the rate card.
    pub daily_rate: Option<Decimal>,
    /// Number of billable days.
    pub working_days: Decimal,
    /// Assignment start date.
    pub start_date: NaiveDate,
    /// Assignment end date.
    pub end_date: NaiveDate,
    /// Free-text skills.
    #[serde(default)]
    pub skills: String,
}

/// A resource with its assignment and derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier for the resource.
    pub id: String,
    /// Personal details.
    pub personal: PersonalDetails,
    /// Assignment details.
    pub assignment: ResourceAssignment,
    /// The daily rate actually applied (manual or inherited).
    pub daily_rate: Decimal,
    /// `daily_rate * working_days`.
    pub earnings: Decimal,
    /// `(expected_rate - daily_rate) * working_days`.
    pub profit: Decimal,
}

impl Resource {
    /// The billing category, defaulting to CIR when none was chosen.
    pub fn resource_type(&self) -> ResourceType {
        self.assignment.resource_type.unwrap_or(ResourceType::Cir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PersonalDetails {
        PersonalDetails {
            name: "John Smith".to_string(),
            email: "john.smith@company.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "New York, NY".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15),
            blood_group: Some(BloodGroup::OPositive),
            resume: None,
        }
    }

    #[test]
    fn test_resource_type_inherited_fields() {
        assert_eq!(ResourceType::Cir.inherited_field(), RateField::DayRate);
        assert_eq!(ResourceType::Acr.inherited_field(), RateField::Saiven);
        assert_eq!(ResourceType::Reference.inherited_field(), RateField::Bau);
    }

    #[test]
    fn test_resource_type_labels_round_trip() {
        for t in [ResourceType::Cir, ResourceType::Acr, ResourceType::Reference] {
            assert_eq!(ResourceType::from_label(t.label()), Some(t));
        }
    }

    #[test]
    fn test_resource_type_serializes_as_label() {
        assert_eq!(serde_json::to_string(&ResourceType::Cir).unwrap(), "\"CIR\"");
        assert_eq!(
            serde_json::to_string(&ResourceType::Reference).unwrap(),
            "\"Reference\""
        );
    }

    #[test]
    fn test_blood_group_serializes_with_sign() {
        assert_eq!(
            serde_json::to_string(&BloodGroup::AbNegative).unwrap(),
            "\"AB-\""
        );
        let parsed: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodGroup::OPositive);
    }

    #[test]
    fn test_complete_details_are_valid() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let mut d = details();
        d.email = String::new();

        match d.validate() {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "email"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_date_of_birth_is_rejected() {
        let mut d = details();
        d.date_of_birth = None;

        match d.validate() {
            Err(EngineError::ValidationError { field, .. }) => {
                assert_eq!(field, "date_of_birth")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let d = details();
        assert_eq!(d.age_on(NaiveDate::from_ymd_opt(2023, 5, 14).unwrap()), Some(32));
        assert_eq!(d.age_on(NaiveDate::from_ymd_opt(2023, 5, 15).unwrap()), Some(33));
    }
}
