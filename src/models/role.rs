//! Role model and the editable role draft.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{ArrangementKey, WorkArrangementForm, WorkArrangementRates};
use crate::calculation::compute_basic_rate;
use crate::error::{EngineError, EngineResult};

/// A priced role: one rate card per work arrangement it is offered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The role name (e.g., "Senior Developer").
    pub name: String,
    /// Free-text description of the role.
    #[serde(default)]
    pub specification: String,
    /// Rate cards keyed by arrangement.
    pub arrangements: BTreeMap<ArrangementKey, WorkArrangementRates>,
}

impl Role {
    /// Returns the rate card for an arrangement, if the role is offered under it.
    pub fn rates(&self, arrangement: ArrangementKey) -> Option<&WorkArrangementRates> {
        self.arrangements.get(&arrangement)
    }
}

/// A role being created or edited.
///
/// Every arrangement has a form, but only the selected ones end up on the
/// finalized [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleDraft {
    /// The role name.
    pub name: String,
    /// Free-text description of the role.
    pub specification: String,
    /// Raw form values per arrangement.
    pub forms: BTreeMap<ArrangementKey, WorkArrangementForm>,
    /// Arrangements the role is offered under.
    pub selected: BTreeSet<ArrangementKey>,
}

impl RoleDraft {
    /// Loads an existing role for editing.
    ///
    /// An arrangement counts as selected when any of its fields is filled in.
    pub fn from_role(role: &Role) -> Self {
        let forms: BTreeMap<ArrangementKey, WorkArrangementForm> = ArrangementKey::ALL
            .into_iter()
            .map(|key| {
                let form = role
                    .rates(key)
                    .map(WorkArrangementForm::from)
                    .unwrap_or_default();
                (key, form)
            })
            .collect();

        let selected = forms
            .iter()
            .filter(|(_, form)| form.is_filled())
            .map(|(key, _)| *key)
            .collect();

        Self {
            name: role.name.clone(),
            specification: role.specification.clone(),
            forms,
            selected,
        }
    }

    /// Validates the draft and produces a [`Role`].
    ///
    /// The basic rate of every selected arrangement is recomputed from its
    /// day rate and deductions; whatever was typed into the basic rate field
    /// is discarded.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is blank, no arrangement is
    /// selected, or a basic rate falls outside the decimal range.
    ///
    /// # Example
    ///
    /// ```
    /// use rate_engine::models::{ArrangementKey, RoleDraft, WorkArrangementForm};
    /// use rust_decimal::Decimal;
    ///
    /// let mut draft = RoleDraft {
    ///     name: "Tester".to_string(),
    ///     ..Default::default()
    /// };
    /// draft.forms.insert(
    ///     ArrangementKey::RemoteUk,
    ///     WorkArrangementForm {
    ///         day_rate: "500".to_string(),
    ///         ws: "20".to_string(),
    ///         ..Default::default()
    ///     },
    /// );
    /// draft.selected.insert(ArrangementKey::RemoteUk);
    ///
    /// let role = draft.finalize().unwrap();
    /// let rates = role.rates(ArrangementKey::RemoteUk).unwrap();
    /// assert_eq!(rates.basic_rate, Decimal::new(480, 0));
    /// ```
    pub fn finalize(&self) -> EngineResult<Role> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "Role name is required"));
        }

        if self.selected.is_empty() {
            return Err(EngineError::validation(
                "arrangements",
                "At least one work arrangement must be selected",
            ));
        }

        let arrangements: BTreeMap<_, _> = self
            .selected
            .iter()
            .map(|key| {
                let mut rates = self
                    .forms
                    .get(key)
                    .map(WorkArrangementForm::to_rates)
                    .unwrap_or_default();
                rates.basic_rate = compute_basic_rate(&rates)?;
                Ok((*key, rates))
            })
            .collect::<EngineResult<_>>()?;

        Ok(Role {
            name: self.name.trim().to_string(),
            specification: self.specification.trim().to_string(),
            arrangements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn filled_form(day_rate: &str) -> WorkArrangementForm {
        WorkArrangementForm {
            day_rate: day_rate.to_string(),
            tolerance: "50".to_string(),
            tada: "30".to_string(),
            basic_rate: "9999".to_string(),
            ..Default::default()
        }
    }

    fn draft_with(keys: &[ArrangementKey]) -> RoleDraft {
        let mut draft = RoleDraft {
            name: "Senior Developer".to_string(),
            specification: "Full-stack".to_string(),
            ..Default::default()
        };
        for key in keys {
            draft.forms.insert(*key, filled_form("800"));
            draft.selected.insert(*key);
        }
        draft
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut draft = draft_with(&[ArrangementKey::OnSiteUk]);
        draft.name = "   ".to_string();

        match draft.finalize() {
            Err(EngineError::ValidationError { field, message }) => {
                assert_eq!(field, "name");
                assert_eq!(message, "Role name is required");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_no_selected_arrangement_is_rejected() {
        let draft = draft_with(&[]);

        match draft.finalize() {
            Err(EngineError::ValidationError { field, .. }) => {
                assert_eq!(field, "arrangements");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_finalize_recomputes_basic_rate() {
        let draft = draft_with(&[ArrangementKey::OnSiteUk]);
        let role = draft.finalize().unwrap();

        let rates = role.rates(ArrangementKey::OnSiteUk).unwrap();
        assert_eq!(rates.day_rate, dec("800"));
        assert_eq!(rates.basic_rate, dec("720"));
    }

    #[test]
    fn test_finalize_rejects_overflowing_deductions() {
        let mut draft = draft_with(&[ArrangementKey::OnSiteUk]);
        let mut form = filled_form("800");
        form.tolerance = Decimal::MAX.to_string();
        form.tada = Decimal::MAX.to_string();
        draft.forms.insert(ArrangementKey::OnSiteUk, form);

        match draft.finalize() {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "deductions"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_finalize_drops_unselected_arrangements() {
        let mut draft = draft_with(&[ArrangementKey::OnSiteUk]);
        draft
            .forms
            .insert(ArrangementKey::RemoteUk, filled_form("700"));

        let role = draft.finalize().unwrap();

        assert_eq!(role.arrangements.len(), 1);
        assert!(role.rates(ArrangementKey::RemoteUk).is_none());
    }

    #[test]
    fn test_from_role_selects_filled_arrangements() {
        let role = draft_with(&[ArrangementKey::OnSiteUk, ArrangementKey::RemoteUk])
            .finalize()
            .unwrap();

        let draft = RoleDraft::from_role(&role);

        assert_eq!(draft.forms.len(), 6);
        assert_eq!(draft.selected.len(), 2);
        assert!(draft.selected.contains(&ArrangementKey::OnSiteUk));
        assert!(draft.selected.contains(&ArrangementKey::RemoteUk));
        assert_eq!(draft.finalize().unwrap(), role);
    }
}
