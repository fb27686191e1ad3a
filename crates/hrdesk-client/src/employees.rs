//! Employee, department, catalog and resume endpoints

use hrdesk_types::{
    Department, Employee, EmployeeDraft, EmployeeId, EmployeeProject, ResumeExtractedSkill,
    ResumeUploadResponse, SkillAssignment, SkillCatalogEntry,
};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{read_value, HrClient};
use crate::error::{ApiError, Result};

/// Multipart field carrying the resume file
pub const RESUME_FIELD: &str = "resume";

#[derive(Deserialize)]
struct SavedId {
    #[serde(default)]
    id: Option<Value>,
}

#[derive(Deserialize)]
struct SkillsEnvelope {
    #[serde(default)]
    skills: Vec<SkillAssignment>,
}

#[derive(Serialize)]
struct SkillsBody<'a> {
    skills: &'a [SkillAssignment],
}

impl HrClient {
    /// `GET /employees`
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.get("employees").await
    }

    /// `GET /employees/{id}`
    pub async fn get_employee(&self, id: EmployeeId) -> Result<Employee> {
        self.get(&format!("employees/{id}")).await
    }

    /// `POST /employees`, returning the new id
    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<EmployeeId> {
        let saved: SavedId = self.send_json(Method::POST, "employees", draft).await?;
        let id = saved
            .id
            .as_ref()
            .and_then(parse_id)
            .ok_or_else(|| ApiError::Server("server did not return the new employee id".into()))?;
        info!(employee_id = id, "Employee created");
        Ok(id)
    }

    /// `PUT /employees/{id}`, returning the id the server reports (or `id`)
    pub async fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> Result<EmployeeId> {
        let saved: Option<SavedId> = self
            .send_json(Method::PUT, &format!("employees/{id}"), draft)
            .await?;
        let id = saved
            .and_then(|s| s.id)
            .as_ref()
            .and_then(parse_id)
            .unwrap_or(id);
        info!(employee_id = id, "Employee updated");
        Ok(id)
    }

    /// `DELETE /employees/{id}`
    pub async fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        let _: Value = self.delete(&format!("employees/{id}")).await?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    /// `GET /employees/{id}/skills`
    pub async fn employee_skills(&self, id: EmployeeId) -> Result<Vec<SkillAssignment>> {
        let envelope: SkillsEnvelope = self.get(&format!("employees/{id}/skills")).await?;
        Ok(envelope.skills)
    }

    /// `PUT /employees/{id}/skills` as a full replace
    ///
    /// Returns the server's list after the write: the echoed `skills` when the
    /// response has them, otherwise a fresh read.
    pub async fn replace_employee_skills(
        &self,
        id: EmployeeId,
        skills: &[SkillAssignment],
    ) -> Result<Vec<SkillAssignment>> {
        let path = format!("employees/{id}/skills");
        let response = self
            .request(Method::PUT, &path)
            .json(&SkillsBody { skills })
            .send()
            .await?;
        let value = read_value(response).await?;

        if let Some(echoed) = value.get("skills").filter(|v| v.is_array()) {
            debug!(employee_id = id, "Skill save echoed the stored list");
            return Ok(serde_json::from_value(echoed.clone())?);
        }
        self.employee_skills(id).await
    }

    /// `GET /employees/{id}/projects`
    pub async fn employee_projects(&self, id: EmployeeId) -> Result<Vec<EmployeeProject>> {
        self.get(&format!("employees/{id}/projects")).await
    }

    /// `GET /skills?q=&department=`
    pub async fn search_skills(
        &self,
        query: Option<&str>,
        department: Option<i64>,
    ) -> Result<Vec<SkillCatalogEntry>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }
        if let Some(dep) = department {
            params.push(("department", dep.to_string()));
        }
        let builder = self.request(Method::GET, "skills").query(&params);
        self.send(builder).await
    }

    /// `GET /departments`
    pub async fn departments(&self) -> Result<Vec<Department>> {
        self.get("departments").await
    }

    /// `POST /employees/{id}/upload-resume` (multipart)
    pub async fn upload_resume(
        &self,
        id: EmployeeId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<ResumeExtractedSkill>> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part(RESUME_FIELD, part);
        let builder = self
            .request(Method::POST, &format!("employees/{id}/upload-resume"))
            .multipart(form);

        let response: ResumeUploadResponse = self.send(builder).await?;
        info!(
            employee_id = id,
            extracted = response.skills.len(),
            "Resume processed"
        );
        Ok(response.skills)
    }
}

fn parse_id(value: &Value) -> Option<EmployeeId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
