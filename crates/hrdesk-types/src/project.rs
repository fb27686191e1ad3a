use serde::{Deserialize, Serialize};

use crate::skill::SkillId;

/// Project ID type
pub type ProjectId = i64;

/// Status string counted as an active project (exact, case-sensitive)
pub const ACTIVE_PROJECT_STATUS: &str = "In Progress";

/// Role used when adding a member without naming one
pub const DEFAULT_MEMBER_ROLE: &str = "Contributor";

/// A project as seen from one employee's dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProject {
    #[serde(rename = "projectID", default)]
    pub project_id: Option<ProjectId>,
    #[serde(rename = "projectName", default)]
    pub project_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
}

impl EmployeeProject {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_PROJECT_STATUS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    #[serde(rename = "empID", default)]
    pub emp_id: Option<i64>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl ProjectMember {
    pub fn role_or_default(&self) -> &str {
        self.role
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_MEMBER_ROLE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "projectID")]
    pub project_id: ProjectId,
    #[serde(rename = "projectName", default)]
    pub project_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

/// Skill tag attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSkill {
    #[serde(rename = "skillID", default)]
    pub skill_id: Option<SkillId>,
    #[serde(rename = "skillName")]
    pub skill_name: String,
}

/// Body for `PUT /api/projects/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub status: String,
    pub priority: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

impl ProjectUpdate {
    /// Form defaults used when the project leaves a field unset
    pub fn from_project(project: &Project) -> Self {
        Self {
            status: project
                .status
                .clone()
                .unwrap_or_else(|| "Not Started".to_string()),
            priority: project.priority.clone().unwrap_or_else(|| "Medium".to_string()),
            start_date: project.start_date.clone().unwrap_or_default(),
            end_date: project.end_date.clone().unwrap_or_default(),
        }
    }
}

/// Body for `POST /api/projects/{id}/members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRequest {
    #[serde(rename = "nameOrID")]
    pub name_or_id: String,
    pub role: String,
}

/// Body for `PUT /api/projects/{id}/members/{ref}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRoleUpdate {
    pub role: String,
}
