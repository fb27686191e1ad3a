//! Project, membership and project-skill endpoints

use hrdesk_types::{
    ActionResponse, MemberRequest, MemberRoleUpdate, Project, ProjectId, ProjectSkill,
    ProjectUpdate,
};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::client::HrClient;
use crate::error::{ApiError, Result};

#[derive(Deserialize)]
struct ProjectsEnvelope {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct ProjectSkillsEnvelope {
    #[serde(default)]
    skills: Vec<ProjectSkill>,
}

impl HrClient {
    /// `GET /api/projects`
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let envelope: ProjectsEnvelope = self.get("api/projects").await?;
        Ok(envelope.projects)
    }

    /// The project with `id`, members included
    ///
    /// The listing already embeds members, so one call covers both.
    pub async fn get_project(&self, id: ProjectId) -> Result<Project> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|p| p.project_id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: format!("Project {id} not found"),
            })
    }

    /// `PUT /api/projects/{id}`
    pub async fn update_project(&self, id: ProjectId, update: &ProjectUpdate) -> Result<ActionResponse> {
        let response: ActionResponse = self
            .send_json(Method::PUT, &format!("api/projects/{id}"), update)
            .await?;
        info!(project_id = id, "Project details saved");
        Ok(response)
    }

    /// `DELETE /api/projects/{id}`
    pub async fn delete_project(&self, id: ProjectId) -> Result<ActionResponse> {
        let response: ActionResponse = self.delete(&format!("api/projects/{id}")).await?;
        info!(project_id = id, "Project deleted");
        Ok(response)
    }

    /// `GET /api/projects/{id}/skills`
    pub async fn project_skills(&self, id: ProjectId) -> Result<Vec<ProjectSkill>> {
        let envelope: ProjectSkillsEnvelope =
            self.get(&format!("api/projects/{id}/skills")).await?;
        Ok(envelope.skills)
    }

    /// `POST /api/projects/{id}/members`
    pub async fn add_project_member(
        &self,
        id: ProjectId,
        request: &MemberRequest,
    ) -> Result<ActionResponse> {
        self.send_json(Method::POST, &format!("api/projects/{id}/members"), request)
            .await
    }

    /// `PUT /api/projects/{id}/members/{member}`
    ///
    /// `member` is an employee id or name and is sent as a single path segment.
    pub async fn update_project_member(
        &self,
        id: ProjectId,
        member: &str,
        update: &MemberRoleUpdate,
    ) -> Result<ActionResponse> {
        let builder =
            self.request_with_segment(Method::PUT, &format!("api/projects/{id}/members"), member)?;
        self.send(builder.json(update)).await
    }

    /// `DELETE /api/projects/{id}/members/{member}`
    pub async fn remove_project_member(&self, id: ProjectId, member: &str) -> Result<ActionResponse> {
        let builder = self.request_with_segment(
            Method::DELETE,
            &format!("api/projects/{id}/members"),
            member,
        )?;
        self.send(builder).await
    }
}
