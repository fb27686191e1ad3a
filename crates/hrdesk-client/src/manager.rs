//! Session and manager skill-catalog endpoints

use hrdesk_types::{ManagerSkill, ManagerSkillDraft, SessionInfo, SkillCategory, SkillId};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::client::HrClient;
use crate::error::Result;

#[derive(Deserialize)]
struct ManagerSkillsEnvelope {
    #[serde(default)]
    skills: Vec<ManagerSkill>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Vec<SkillCategory>,
}

impl HrClient {
    /// `GET /api/me`
    ///
    /// Fails with [`ApiError::Server`](crate::ApiError::Server) when nobody is logged in.
    pub async fn me(&self) -> Result<SessionInfo> {
        self.get("api/me").await
    }

    /// `POST /api/logout`
    pub async fn logout(&self) -> Result<()> {
        let _: Value = self.send(self.request(Method::POST, "api/logout")).await?;
        info!("Logged out");
        Ok(())
    }

    /// `GET /api/skill-categories`
    pub async fn skill_categories(&self) -> Result<Vec<SkillCategory>> {
        let envelope: CategoriesEnvelope = self.get("api/skill-categories").await?;
        Ok(envelope.categories)
    }

    /// `GET /api/manager/{id}/skills`
    pub async fn manager_skills(&self, manager_id: i64) -> Result<Vec<ManagerSkill>> {
        let envelope: ManagerSkillsEnvelope =
            self.get(&format!("api/manager/{manager_id}/skills")).await?;
        Ok(envelope.skills)
    }

    /// `POST /api/manager/{id}/skills`
    pub async fn create_manager_skill(&self, manager_id: i64, draft: &ManagerSkillDraft) -> Result<()> {
        let _: Value = self
            .send_json(Method::POST, &format!("api/manager/{manager_id}/skills"), draft)
            .await?;
        info!(manager_id, skill = %draft.skill_name, "Catalog skill added");
        Ok(())
    }

    /// `PUT /api/manager/{id}/skills/{skill}`
    pub async fn update_manager_skill(
        &self,
        manager_id: i64,
        skill_id: SkillId,
        draft: &ManagerSkillDraft,
    ) -> Result<()> {
        let _: Value = self
            .send_json(
                Method::PUT,
                &format!("api/manager/{manager_id}/skills/{skill_id}"),
                draft,
            )
            .await?;
        info!(manager_id, skill_id, "Catalog skill updated");
        Ok(())
    }

    /// `DELETE /api/manager/{id}/skills/{skill}`
    pub async fn delete_manager_skill(&self, manager_id: i64, skill_id: SkillId) -> Result<()> {
        let _: Value = self
            .delete(&format!("api/manager/{manager_id}/skills/{skill_id}"))
            .await?;
        info!(manager_id, skill_id, "Catalog skill deleted");
        Ok(())
    }
}
