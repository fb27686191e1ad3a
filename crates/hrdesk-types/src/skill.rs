use serde::{Deserialize, Serialize};

/// Catalog skill identifier
pub type SkillId = i64;

/// Skill category identifier
pub type CategoryId = i64;

/// Highest proficiency level the UI offers
pub const MAX_PROFICIENCY: u8 = 10;

/// Category given to a skill name that matches nothing in the catalog
pub const CUSTOM_CATEGORY: &str = "Custom";

/// Category shown when a row has no category yet
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Level assigned to a resume skill that arrives without one
pub const DEFAULT_RESUME_LEVEL: u8 = 3;

/// Evidence assigned to a resume skill that arrives without any
pub const DEFAULT_RESUME_EVIDENCE: &str = "Extracted from resume";

/// A server-defined skill, as returned by `GET /skills`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalogEntry {
    #[serde(rename = "skillID")]
    pub skill_id: SkillId,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    #[serde(rename = "skillCategoryname", default)]
    pub category_name: Option<String>,
}

impl SkillCatalogEntry {
    pub fn new(skill_id: SkillId, skill_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            skill_id,
            skill_name: skill_name.into(),
            category_name: Some(category.into()),
        }
    }

    /// Category to display, falling back to "Uncategorized"
    pub fn category_or_default(&self) -> &str {
        self.category_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// One skill recorded against an employee
///
/// `skill_id` is `None` for a custom skill the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssignment {
    #[serde(rename = "skillID", default)]
    pub skill_id: Option<SkillId>,
    #[serde(rename = "skillName", default, deserialize_with = "null_as_default")]
    pub skill_name: String,
    #[serde(
        rename = "skillCategoryname",
        default,
        deserialize_with = "null_as_default"
    )]
    pub category_name: String,
    #[serde(rename = "profiencylevel", default, deserialize_with = "level_or_zero")]
    pub proficiency_level: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evidence: String,
}

impl SkillAssignment {
    /// An empty row waiting for the user to type a skill name
    pub fn blank() -> Self {
        Self {
            skill_id: None,
            skill_name: String::new(),
            category_name: UNCATEGORIZED.to_string(),
            proficiency_level: 0,
            evidence: String::new(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.skill_id.is_none()
    }
}

/// A skill found by the resume parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeExtractedSkill {
    #[serde(rename = "skillID", default)]
    pub skill_id: Option<SkillId>,
    #[serde(rename = "skillName", default, deserialize_with = "null_as_default")]
    pub skill_name: String,
    #[serde(rename = "skillCategoryname", alias = "categoryName", default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "clamped_level")]
    pub level: Option<u8>,
    #[serde(default)]
    pub evidence: Option<String>,
}

/// Response body of `POST /employees/{id}/upload-resume`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub skills: Vec<ResumeExtractedSkill>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A skill in a manager's department-scoped taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSkill {
    #[serde(rename = "skillID")]
    pub skill_id: SkillId,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    #[serde(rename = "skillCategoryID", default)]
    pub category_id: Option<CategoryId>,
}

/// Body for creating or renaming a manager skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerSkillDraft {
    #[serde(rename = "skillName")]
    pub skill_name: String,
    #[serde(rename = "skillCategoryID")]
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    #[serde(rename = "skillCategoryID")]
    pub category_id: CategoryId,
    #[serde(rename = "skillCategoryName")]
    pub name: String,
}

/// Human label for a proficiency level
pub fn level_label(level: u8) -> &'static str {
    match level {
        0 => "None",
        1 => "Novice",
        2 => "Beginner",
        3 => "Developing",
        4 => "Intermediate",
        5 => "Advanced",
        6 => "Proficient",
        7 => "Highly Skilled",
        8 => "Expert",
        9 => "Master",
        10 => "Guru",
        _ => "",
    }
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON number, rounded and clamped to 0..=10; `null` stays `None`
fn clamped_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(|raw| {
        let level = raw.round().clamp(0.0, f64::from(MAX_PROFICIENCY));
        u8::try_from(level as i64).unwrap_or(MAX_PROFICIENCY)
    }))
}

fn level_or_zero<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(clamped_level(deserializer)?.unwrap_or(0))
}
