//! Project roll-ups and list ordering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Project, ProjectStatus, Resource, ResourceType};

/// Totals for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project name.
    pub name: String,
    /// Client name.
    pub client: String,
    /// Current status.
    pub status: ProjectStatus,
    /// Number of assigned resources.
    pub resource_count: usize,
    /// Sum of resource earnings.
    pub total_earnings: Decimal,
    /// Profit from CIR resources.
    pub cir_profit: Decimal,
    /// Profit from ACR resources.
    pub acr_profit: Decimal,
    /// Profit from Reference resources.
    pub reference_profit: Decimal,
}

impl ProjectSummary {
    /// CIR plus ACR profit, the headline figure on the project list.
    /// Saturates at the bounds of `Decimal`.
    pub fn overall_profit(&self) -> Decimal {
        self.cir_profit.saturating_add(self.acr_profit)
    }
}

fn accumulate(total: &mut Decimal, amount: Decimal, field: &str) -> EngineResult<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| EngineError::validation(field, "is out of range"))?;
    Ok(())
}

/// Rolls up a project's resources.
///
/// # Errors
///
/// Returns `ValidationError` if a total overflows.
pub fn summarize_project(project: &Project) -> EngineResult<ProjectSummary> {
    let mut summary = ProjectSummary {
        name: project.name.clone(),
        client: project.client.clone(),
        status: project.status,
        resource_count: project.resources.len(),
        total_earnings: Decimal::ZERO,
        cir_profit: Decimal::ZERO,
        acr_profit: Decimal::ZERO,
        reference_profit: Decimal::ZERO,
    };

    for resource in &project.resources {
        accumulate(&mut summary.total_earnings, resource.earnings, "total_earnings")?;
        let (total, field) = match resource.resource_type() {
            ResourceType::Cir => (&mut summary.cir_profit, "cir_profit"),
            ResourceType::Acr => (&mut summary.acr_profit, "acr_profit"),
            ResourceType::Reference => (&mut summary.reference_profit, "reference_profit"),
        };
        accumulate(total, resource.profit, field)?;
    }

    Ok(summary)
}

/// Orderings offered on the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortKey {
    /// Name, A to Z.
    Name,
    /// Client, A to Z.
    Client,
    /// Overall profit, highest first.
    OverallProfit,
    /// CIR profit, highest first.
    CirProfit,
    /// Status label, A to Z.
    Status,
    /// Resource count, highest first.
    Resources,
}

/// Sorts project summaries in place. The sort is stable.
pub fn sort_projects(projects: &mut [ProjectSummary], key: ProjectSortKey) {
    match key {
        ProjectSortKey::Name => projects.sort_by(|a, b| a.name.cmp(&b.name)),
        ProjectSortKey::Client => projects.sort_by(|a, b| a.client.cmp(&b.client)),
        ProjectSortKey::OverallProfit => {
            projects.sort_by(|a, b| b.overall_profit().cmp(&a.overall_profit()))
        }
        ProjectSortKey::CirProfit => projects.sort_by(|a, b| b.cir_profit.cmp(&a.cir_profit)),
        ProjectSortKey::Status => {
            projects.sort_by(|a, b| a.status.label().cmp(b.status.label()))
        }
        ProjectSortKey::Resources => {
            projects.sort_by(|a, b| b.resource_count.cmp(&a.resource_count))
        }
    }
}

/// Orderings offered on a project's resource list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSortKey {
    /// Name, A to Z.
    Name,
    /// Earnings, highest first.
    Earnings,
    /// Daily rate, highest first.
    DailyRate,
    /// Working days, highest first.
    WorkingDays,
}

/// Sorts resources in place. The sort is stable.
pub fn sort_resources(resources: &mut [Resource], key: ResourceSortKey) {
    match key {
        ResourceSortKey::Name => {
            resources.sort_by(|a, b| a.personal.name.cmp(&b.personal.name))
        }
        ResourceSortKey::Earnings => resources.sort_by(|a, b| b.earnings.cmp(&a.earnings)),
        ResourceSortKey::DailyRate => resources.sort_by(|a, b| b.daily_rate.cmp(&a.daily_rate)),
        ResourceSortKey::WorkingDays => resources.sort_by(|a, b| {
            b.assignment
                .working_days
                .cmp(&a.assignment.working_days)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalDetails, ResourceAssignment};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn resource(
        name: &str,
        resource_type: ResourceType,
        rate: &str,
        days: &str,
        profit: &str,
    ) -> Resource {
        let daily_rate = dec(rate);
        let working_days = dec(days);
        Resource {
            id: name.to_lowercase(),
            personal: PersonalDetails {
                name: name.to_string(),
                email: format!("{}@company.com", name.to_lowercase()),
                phone: "555".to_string(),
                location: "London".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
                blood_group: None,
                resume: None,
            },
            assignment: ResourceAssignment {
                project: "Project Alpha".to_string(),
                role: "Senior Developer".to_string(),
                work_arrangement: None,
                resource_type: Some(resource_type),
                daily_rate: Some(daily_rate),
                working_days,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                skills: String::new(),
            },
            daily_rate,
            earnings: daily_rate * working_days,
            profit: dec(profit),
        }
    }

    fn project(
        name: &str,
        client: &str,
        status: ProjectStatus,
        resources: Vec<Resource>,
    ) -> Project {
        Project {
            name: name.to_string(),
            client: client.to_string(),
            team: String::new(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            status,
            roles: vec![],
            resources,
        }
    }

    fn alpha() -> Project {
        project(
            "Project Alpha",
            "TechCorp Inc.",
            ProjectStatus::Active,
            vec![
                resource("John Smith", ResourceType::Cir, "650", "120", "18000"),
                resource("Mike Chen", ResourceType::Reference, "700", "80", "8000"),
                resource("Sara Lee", ResourceType::Acr, "750", "10", "500"),
            ],
        )
    }

    #[test]
    fn test_summary_totals() {
        let summary = summarize_project(&alpha()).unwrap();

        assert_eq!(summary.resource_count, 3);
        assert_eq!(summary.total_earnings, dec("141500"));
        assert_eq!(summary.cir_profit, dec("18000"));
        assert_eq!(summary.acr_profit, dec("500"));
        assert_eq!(summary.reference_profit, dec("8000"));
        assert_eq!(summary.overall_profit(), dec("18500"));
    }

    #[test]
    fn test_empty_project_summary_is_zero() {
        let summary = summarize_project(&project(
            "Empty",
            "Nobody",
            ProjectStatus::OnHold,
            vec![],
        ))
        .unwrap();
        assert_eq!(summary.resource_count, 0);
        assert_eq!(summary.total_earnings, Decimal::ZERO);
        assert_eq!(summary.overall_profit(), Decimal::ZERO);
    }

    #[test]
    fn test_summary_overflow_is_validation_error() {
        let mut big = resource("A", ResourceType::Cir, "1", "1", "0");
        big.earnings = Decimal::MAX;
        let huge = project(
            "Huge",
            "Nobody",
            ProjectStatus::Active,
            vec![big.clone(), big],
        );

        match summarize_project(&huge) {
            Err(EngineError::ValidationError { field, .. }) => {
                assert_eq!(field, "total_earnings")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_overall_profit_saturates() {
        let mut big = resource("A", ResourceType::Cir, "1", "1", "0");
        big.profit = Decimal::MAX;
        let mut other = big.clone();
        other.assignment.resource_type = Some(ResourceType::Acr);
        let summary = summarize_project(&project(
            "Huge",
            "Nobody",
            ProjectStatus::Active,
            vec![big, other],
        ))
        .unwrap();

        assert_eq!(summary.overall_profit(), Decimal::MAX);
    }

    fn summaries() -> Vec<ProjectSummary> {
        vec![
            summarize_project(&alpha()).unwrap(),
            summarize_project(&project(
                "Project Beta",
                "FinanceFlow Ltd.",
                ProjectStatus::Active,
                vec![
                    resource("A", ResourceType::Cir, "600", "10", "95"),
                    resource("B", ResourceType::Acr, "600", "10", "-25"),
                ],
            ))
            .unwrap(),
            summarize_project(&project(
                "Project Gamma",
                "DataDriven Co.",
                ProjectStatus::Completed,
                vec![resource("C", ResourceType::Cir, "600", "10", "230")],
            ))
            .unwrap(),
        ]
    }

    fn names(projects: &[ProjectSummary]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_sort_projects_by_client() {
        let mut projects = summaries();
        sort_projects(&mut projects, ProjectSortKey::Client);
        assert_eq!(
            names(&projects),
            vec!["Project Gamma", "Project Beta", "Project Alpha"]
        );
    }

    #[test]
    fn test_sort_projects_by_overall_profit_descending() {
        let mut projects = summaries();
        sort_projects(&mut projects, ProjectSortKey::OverallProfit);
        assert_eq!(
            names(&projects),
            vec!["Project Alpha", "Project Gamma", "Project Beta"]
        );
    }

    #[test]
    fn test_sort_projects_by_status_is_stable() {
        let mut projects = summaries();
        sort_projects(&mut projects, ProjectSortKey::Status);
        assert_eq!(
            names(&projects),
            vec!["Project Alpha", "Project Beta", "Project Gamma"]
        );
    }

    #[test]
    fn test_sort_projects_by_resources_descending() {
        let mut projects = summaries();
        sort_projects(&mut projects, ProjectSortKey::Resources);
        assert_eq!(projects[0].name, "Project Alpha");
        assert_eq!(projects[2].name, "Project Gamma");
    }

    #[test]
    fn test_sort_resources_by_earnings_descending() {
        let mut resources = alpha().resources;
        sort_resources(&mut resources, ResourceSortKey::Earnings);
        let order: Vec<&str> = resources.iter().map(|r| r.personal.name.as_str()).collect();
        assert_eq!(order, vec!["John Smith", "Mike Chen", "Sara Lee"]);
    }

    #[test]
    fn test_sort_resources_by_daily_rate_descending() {
        let mut resources = alpha().resources;
        sort_resources(&mut resources, ResourceSortKey::DailyRate);
        assert_eq!(resources[0].personal.name, "Sara Lee");
        assert_eq!(resources[2].personal.name, "John Smith");
    }

    #[test]
    fn test_sort_resources_by_name() {
        let mut resources = alpha().resources;
        resources.reverse();
        sort_resources(&mut resources, ResourceSortKey::Name);
        assert_eq!(resources[0].personal.name, "John Smith");
    }
}
