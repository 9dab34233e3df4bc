//! Project model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Resource, Role};
use crate::error::{EngineError, EngineResult};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Work in progress.
    Active,
    /// Delivered.
    Completed,
    /// Paused.
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    /// The label shown to users; also the sort key for status ordering.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

/// The header fields of a project as captured by the project form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Project name.
    pub name: String,
    /// Client name.
    pub client: String,
    /// Delivery team name.
    #[serde(default)]
    pub team: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Checks the fields the project form requires.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or client is blank, or if the
    /// end date is before the start date.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "Project name is required"));
        }
        if self.client.trim().is_empty() {
            return Err(EngineError::validation("client", "Client name is required"));
        }
        if self.end_date < self.start_date {
            return Err(EngineError::validation(
                "end_date",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        Ok(())
    }

    /// Validates the draft and turns it into a project with the given roles.
    ///
    /// # Errors
    ///
    /// See [`ProjectDraft::validate`].
    pub fn into_project(self, roles: Vec<Role>) -> EngineResult<Project> {
        self.validate()?;

        Ok(Project {
            name: self.name,
            client: self.client,
            team: self.team,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            roles,
            resources: Vec::new(),
        })
    }
}

/// A resource supply project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Client name.
    pub client: String,
    /// Delivery team name.
    pub team: String,
    /// Free-text description.
    pub description: String,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: ProjectStatus,
    /// Roles priced for this project.
    pub roles: Vec<Role>,
    /// Resources assigned to this project.
    pub resources: Vec<Resource>,
}

impl Project {
    /// Removes a role by name. Resources already assigned to it are untouched.
    pub fn remove_role(&mut self, name: &str) -> Option<Role> {
        let index = self.roles.iter().position(|role| role.name == name)?;
        Some(self.roles.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProjectDraft {
        ProjectDraft {
            name: "Project Alpha".to_string(),
            client: "TechCorp Inc.".to_string(),
            team: "Platform".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            status: ProjectStatus::Active,
        }
    }

    #[test]
    fn test_valid_draft_becomes_project() {
        let project = draft().into_project(vec![]).unwrap();
        assert_eq!(project.name, "Project Alpha");
        assert!(project.resources.is_empty());
    }

    #[test]
    fn test_blank_client_is_rejected() {
        let mut d = draft();
        d.client = " ".to_string();

        match d.into_project(vec![]) {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "client"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut d = draft();
        d.end_date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        match d.into_project(vec![]) {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "end_date"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_same_day_project_is_valid() {
        let mut d = draft();
        d.end_date = d.start_date;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_status_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"On Hold\""
        );
        assert_eq!(ProjectStatus::Completed.label(), "Completed");
    }

    #[test]
    fn test_remove_unknown_role_returns_none() {
        let mut project = draft().into_project(vec![]).unwrap();
        assert!(project.remove_role("Architect").is_none());
    }
}
