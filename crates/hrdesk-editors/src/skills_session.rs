//! One employee's skills dashboard
//!
//! Loads the employee, their skills, the skill catalog and their projects in
//! one go, then owns the [`SkillReconciler`] for the editing session.

use chrono::{DateTime, Utc};
use hrdesk_client::HrClient;
use hrdesk_reconciler::{
    reduce, CommandOutcome, MergeCounts, SaveError, SkillCommand, SkillReconciler, SkillStats,
};
use hrdesk_types::{Employee, EmployeeId, EmployeeProject};
use tracing::info;

use crate::error::EditorError;

#[derive(Debug, Clone)]
pub struct SkillsDashboard {
    employee_id: EmployeeId,
    employee: Employee,
    projects: Vec<EmployeeProject>,
    skills: SkillReconciler,
}

impl SkillsDashboard {
    pub fn new(
        employee_id: EmployeeId,
        employee: Employee,
        projects: Vec<EmployeeProject>,
        skills: SkillReconciler,
    ) -> Self {
        Self {
            employee_id,
            employee,
            projects,
            skills,
        }
    }

    /// Fetch everything the dashboard shows; any failed request fails the load
    pub async fn load(client: &HrClient, employee_id: EmployeeId) -> Result<Self, EditorError> {
        let (employee, assignments, catalog, projects) = futures::try_join!(
            client.get_employee(employee_id),
            client.employee_skills(employee_id),
            client.search_skills(None, None),
            client.employee_projects(employee_id),
        )?;
        info!(
            employee_id,
            skills = assignments.len(),
            catalog = catalog.len(),
            projects = projects.len(),
            "Skills dashboard loaded"
        );
        Ok(Self::new(
            employee_id,
            employee,
            projects,
            SkillReconciler::new(catalog, assignments),
        ))
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn projects(&self) -> &[EmployeeProject] {
        &self.projects
    }

    pub fn skills(&self) -> &SkillReconciler {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut SkillReconciler {
        &mut self.skills
    }

    /// Hand the list over, e.g. to a [`hrdesk_reconciler::Dispatcher`]
    pub fn into_parts(self) -> (SkillReconciler, Vec<EmployeeProject>) {
        (self.skills, self.projects)
    }

    pub fn apply(&mut self, command: SkillCommand) -> CommandOutcome {
        let transition = reduce(std::mem::take(&mut self.skills), command);
        self.skills = transition.state;
        transition.outcome
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SkillStats {
        SkillStats::compute(&self.skills.assignments(), &self.projects, now)
    }

    /// Upload a resume and merge what the server extracted into the list
    ///
    /// The merged list is not saved; call [`SkillsDashboard::save`] for that.
    pub async fn import_resume(
        &mut self,
        client: &HrClient,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<MergeCounts, EditorError> {
        let extracted = client
            .upload_resume(self.employee_id, file_name, bytes)
            .await?;
        Ok(self.skills.merge_resume_skills(&extracted))
    }

    pub async fn save(&mut self, client: &HrClient) -> Result<usize, SaveError> {
        self.skills.save(client, self.employee_id).await
    }

    pub async fn delete_employee(self, client: &HrClient) -> Result<(), EditorError> {
        client.delete_employee(self.employee_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hrdesk_types::{SkillAssignment, SkillCatalogEntry};

    fn dashboard() -> SkillsDashboard {
        let assignment = SkillAssignment {
            skill_id: Some(1),
            skill_name: "Rust".into(),
            category_name: "Languages".into(),
            proficiency_level: 7,
            evidence: String::new(),
        };
        SkillsDashboard::new(
            3,
            Employee::default(),
            vec![EmployeeProject {
                project_name: "Atlas".into(),
                status: "In Progress".into(),
                start_date: Some("2024-01-01".into()),
                ..Default::default()
            }],
            SkillReconciler::new(
                vec![SkillCatalogEntry::new(1, "Rust", "Languages")],
                vec![assignment],
            ),
        )
    }

    #[test]
    fn test_apply_and_stats() {
        let mut dashboard = dashboard();
        let outcome = dashboard.apply(SkillCommand::AddBlankRow);
        assert!(matches!(outcome, CommandOutcome::RowAdded(_)));

        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single();
        let stats = dashboard.stats(now.unwrap_or_else(Utc::now));
        assert_eq!(stats.total_skills, 2);
        assert_eq!(stats.average_proficiency, "3.5");
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.project_days, 10);
    }
}
