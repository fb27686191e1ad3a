//! Project detail panel: details, members and skill tags

use hrdesk_client::HrClient;
use hrdesk_types::{
    ActionResponse, MemberRequest, MemberRoleUpdate, Project, ProjectId, ProjectMember,
    ProjectSkill, ProjectUpdate, DEFAULT_MEMBER_ROLE,
};
use tracing::{info, warn};

use crate::error::{EditorError, ValidationError};

#[derive(Debug, Clone)]
pub struct ProjectPanel {
    project: Project,
    skills: Vec<ProjectSkill>,
}

impl ProjectPanel {
    pub fn new(project: Project, skills: Vec<ProjectSkill>) -> Self {
        Self { project, skills }
    }

    /// Fetch the project with its members and skill tags
    ///
    /// A failed skill fetch leaves the panel with no tags rather than failing.
    pub async fn load(client: &HrClient, id: ProjectId) -> Result<Self, EditorError> {
        let project = client.get_project(id).await?;
        let skills = match client.project_skills(id).await {
            Ok(skills) => skills,
            Err(e) => {
                warn!(project_id = id, "Failed to load project skills: {}", e);
                Vec::new()
            }
        };
        Ok(Self::new(project, skills))
    }

    pub async fn reload(&mut self, client: &HrClient) -> Result<(), EditorError> {
        *self = Self::load(client, self.project.project_id).await?;
        Ok(())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn members(&self) -> &[ProjectMember] {
        &self.project.members
    }

    pub fn skills(&self) -> &[ProjectSkill] {
        &self.skills
    }

    /// Editable details, defaulted where the project has none
    pub fn details(&self) -> ProjectUpdate {
        ProjectUpdate::from_project(&self.project)
    }

    pub async fn save_details(
        &mut self,
        client: &HrClient,
        update: &ProjectUpdate,
    ) -> Result<String, EditorError> {
        let response = client.update_project(self.project.project_id, update).await?;
        self.reload(client).await?;
        Ok(message_or(response, "Project updated"))
    }

    pub async fn delete_project(self, client: &HrClient) -> Result<String, EditorError> {
        let response = client.delete_project(self.project.project_id).await?;
        Ok(message_or(response, "Project deleted"))
    }

    /// Add a member by employee id or name; blank roles become the default
    pub async fn add_member(
        &mut self,
        client: &HrClient,
        reference: &str,
        role: &str,
    ) -> Result<String, EditorError> {
        let request = MemberRequest {
            name_or_id: member_reference(reference)?,
            role: role_or_default(role),
        };
        let response = client
            .add_project_member(self.project.project_id, &request)
            .await?;
        info!(
            project_id = self.project.project_id,
            member = %request.name_or_id,
            "Member added"
        );
        self.reload(client).await?;
        Ok(message_or(response, "Member added"))
    }

    pub async fn edit_member(
        &mut self,
        client: &HrClient,
        reference: &str,
        role: &str,
    ) -> Result<String, EditorError> {
        let member = member_reference(reference)?;
        let update = MemberRoleUpdate {
            role: role_or_default(role),
        };
        let response = client
            .update_project_member(self.project.project_id, &member, &update)
            .await?;
        self.reload(client).await?;
        Ok(message_or(response, "Member updated"))
    }

    pub async fn remove_member(
        &mut self,
        client: &HrClient,
        reference: &str,
    ) -> Result<String, EditorError> {
        let member = member_reference(reference)?;
        let response = client
            .remove_project_member(self.project.project_id, &member)
            .await?;
        info!(project_id = self.project.project_id, %member, "Member removed");
        self.reload(client).await?;
        Ok(message_or(response, "Member removed"))
    }
}

fn member_reference(reference: &str) -> Result<String, ValidationError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ValidationError::MissingMemberReference);
    }
    Ok(reference.to_string())
}

fn role_or_default(role: &str) -> String {
    match role.trim() {
        "" => DEFAULT_MEMBER_ROLE.to_string(),
        role => role.to_string(),
    }
}

fn message_or(response: ActionResponse, fallback: &str) -> String {
    match response.display_text() {
        text if text.is_empty() => fallback.to_string(),
        text => text,
    }
}
