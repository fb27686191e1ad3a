//! Manager-scoped skill taxonomy with local filtering
//!
//! The full catalog and the category lookup are cached; filtering never
//! refetches. Every mutation reloads both from the server.

use hrdesk_client::HrClient;
use hrdesk_types::{CategoryId, ManagerSkill, ManagerSkillDraft, SkillCategory, SkillId};
use tracing::{debug, info};

use crate::error::{EditorError, ValidationError};

#[derive(Debug, Clone)]
pub struct CatalogEditor {
    manager_id: i64,
    all_skills: Vec<ManagerSkill>,
    categories: Vec<SkillCategory>,
}

impl CatalogEditor {
    pub fn new(manager_id: i64, all_skills: Vec<ManagerSkill>, categories: Vec<SkillCategory>) -> Self {
        Self {
            manager_id,
            all_skills,
            categories,
        }
    }

    /// Load the catalog of `manager_id`
    pub async fn load(client: &HrClient, manager_id: i64) -> Result<Self, EditorError> {
        let mut editor = Self::new(manager_id, Vec::new(), Vec::new());
        editor.reload(client).await?;
        Ok(editor)
    }

    /// Load the catalog of the logged-in manager
    pub async fn for_session(client: &HrClient) -> Result<Self, EditorError> {
        let session = client.me().await?;
        let manager_id = session
            .manager_id
            .ok_or_else(|| EditorError::NotFound("Logged-in manager".into()))?;
        Self::load(client, manager_id).await
    }

    pub async fn reload(&mut self, client: &HrClient) -> Result<(), EditorError> {
        self.categories = client.skill_categories().await?;
        self.all_skills = client.manager_skills(self.manager_id).await?;
        debug!(
            manager_id = self.manager_id,
            skills = self.all_skills.len(),
            categories = self.categories.len(),
            "Catalog loaded"
        );
        Ok(())
    }

    pub fn manager_id(&self) -> i64 {
        self.manager_id
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Name of category `id`, or "" when unknown
    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        id.and_then(|id| self.categories.iter().find(|c| c.category_id == id))
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }

    /// Skills where every query term occurs in the name or the category name
    ///
    /// Matching is case-insensitive and each term may hit a different field.
    /// An empty query returns the whole catalog.
    pub fn filter(&self, query: &str) -> Vec<&ManagerSkill> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        self.all_skills
            .iter()
            .filter(|skill| {
                let name = skill.skill_name.to_lowercase();
                let category = self.category_name(skill.category_id).to_lowercase();
                terms
                    .iter()
                    .all(|term| name.contains(term.as_str()) || category.contains(term.as_str()))
            })
            .collect()
    }

    pub fn clear_filter(&self) -> &[ManagerSkill] {
        &self.all_skills
    }

    pub async fn add(
        &mut self,
        client: &HrClient,
        name: &str,
        category_id: CategoryId,
    ) -> Result<(), EditorError> {
        let draft = draft(name, category_id)?;
        client.create_manager_skill(self.manager_id, &draft).await?;
        self.reload(client).await
    }

    pub async fn update(
        &mut self,
        client: &HrClient,
        skill_id: SkillId,
        name: &str,
        category_id: CategoryId,
    ) -> Result<(), EditorError> {
        let draft = draft(name, category_id)?;
        client
            .update_manager_skill(self.manager_id, skill_id, &draft)
            .await?;
        self.reload(client).await
    }

    pub async fn delete(&mut self, client: &HrClient, skill_id: SkillId) -> Result<(), EditorError> {
        client.delete_manager_skill(self.manager_id, skill_id).await?;
        info!(skill_id, "Removed skill from catalog");
        self.reload(client).await
    }
}

fn draft(name: &str, category_id: CategoryId) -> Result<ManagerSkillDraft, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingSkillName);
    }
    Ok(ManagerSkillDraft {
        skill_name: name.to_string(),
        category_id,
    })
}
