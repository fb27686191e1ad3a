//! The editable skill list and its mutation surface

use hrdesk_types::{
    EmployeeId, ResumeExtractedSkill, SkillAssignment, SkillCatalogEntry, CUSTOM_CATEGORY,
    DEFAULT_RESUME_EVIDENCE, DEFAULT_RESUME_LEVEL, MAX_PROFICIENCY, UNCATEGORIZED,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::SkillCatalog;
use crate::row::{RowId, SkillRow};
use crate::store::{SaveError, SkillStore};

/// Counts reported after merging resume skills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    pub added: usize,
    pub updated: usize,
}

/// Ordered, editable list of one employee's skills
///
/// Rows are addressed by [`RowId`]. Positions are only meaningful until the
/// next structural change (add, remove, merge append, save).
#[derive(Debug, Clone, Default)]
pub struct SkillReconciler {
    catalog: Arc<SkillCatalog>,
    rows: Vec<SkillRow>,
    positions: HashMap<RowId, usize>,
}

impl SkillReconciler {
    /// Create a reconciler from the catalog and the employee's recorded skills
    pub fn new(catalog: Vec<SkillCatalogEntry>, assignments: Vec<SkillAssignment>) -> Self {
        Self::with_catalog(Arc::new(SkillCatalog::new(catalog)), assignments)
    }

    /// Create a reconciler sharing an already built catalog
    pub fn with_catalog(catalog: Arc<SkillCatalog>, assignments: Vec<SkillAssignment>) -> Self {
        let mut reconciler = Self {
            catalog,
            rows: assignments.into_iter().map(SkillRow::new).collect(),
            positions: HashMap::new(),
        };
        reconciler.reindex();
        reconciler
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append an empty row and return its id (the row to focus)
    pub fn add_blank_row(&mut self) -> RowId {
        let row = SkillRow::new(SkillAssignment::blank());
        let id = row.id;
        self.rows.push(row);
        self.reindex();
        debug!(row = %id, "Added blank skill row");
        id
    }

    /// Resolve typed text against the catalog
    ///
    /// A case-insensitive match adopts the catalog's id, exact name and
    /// category. Anything else becomes a custom skill with the text verbatim.
    pub fn set_row_name(&mut self, id: RowId, typed: &str) -> bool {
        let resolved = match self.catalog.find_by_name(typed) {
            Some(entry) => (
                Some(entry.skill_id),
                entry.skill_name.clone(),
                entry.category_or_default().to_string(),
            ),
            None => (None, typed.to_string(), CUSTOM_CATEGORY.to_string()),
        };

        let Some(row) = self.row_mut(id) else {
            return false;
        };
        let (skill_id, skill_name, category_name) = resolved;
        row.skill_id = skill_id;
        row.skill_name = skill_name;
        row.category_name = category_name;
        true
    }

    /// Set the proficiency level, clamped to 0..=10
    pub fn set_row_level(&mut self, id: RowId, level: i32) -> bool {
        let clamped = level.clamp(0, i32::from(MAX_PROFICIENCY));
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        // clamp above keeps this in range
        row.proficiency_level = u8::try_from(clamped).unwrap_or(MAX_PROFICIENCY);
        true
    }

    pub fn set_row_evidence(&mut self, id: RowId, text: &str) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        row.evidence = text.to_string();
        true
    }

    /// Delete a row, returning what it held
    pub fn remove_row(&mut self, id: RowId) -> Option<SkillAssignment> {
        let pos = self.position_of(id)?;
        let removed = self.rows.remove(pos);
        self.reindex();
        debug!(row = %id, skill = %removed.assignment.skill_name, "Removed skill row");
        Some(removed.assignment)
    }

    /// Fold resume-extracted skills into the list
    ///
    /// Unknown skill ids are appended. Known ones are raised only when the
    /// resume level is strictly higher, with the resume evidence appended.
    /// Nothing is persisted.
    pub fn merge_resume_skills(&mut self, extracted: &[ResumeExtractedSkill]) -> MergeCounts {
        let mut counts = MergeCounts::default();

        for skill in extracted {
            let existing = skill.skill_id.and_then(|sid| {
                self.rows
                    .iter_mut()
                    .find(|row| row.assignment.skill_id == Some(sid))
            });

            match existing {
                Some(row) => {
                    let level = skill.level.unwrap_or(0).min(MAX_PROFICIENCY);
                    if level > row.assignment.proficiency_level {
                        let row = &mut row.assignment;
                        row.proficiency_level = level;
                        row.evidence = format!(
                            "{} | Resume: {}",
                            row.evidence,
                            skill.evidence.as_deref().unwrap_or("")
                        )
                        .trim()
                        .to_string();
                        counts.updated += 1;
                    }
                }
                None => {
                    let assignment = self.assignment_from_resume(skill);
                    self.rows.push(SkillRow::new(assignment));
                    counts.added += 1;
                }
            }
        }

        if counts.added > 0 {
            self.reindex();
        }
        info!(
            added = counts.added,
            updated = counts.updated,
            "Merged {} resume skills",
            extracted.len()
        );
        counts
    }

    /// Persist the whole list as a replace-all and adopt the store's result
    ///
    /// On failure the in-memory rows are left exactly as they were.
    pub async fn save<S>(&mut self, store: &S, employee_id: EmployeeId) -> Result<usize, SaveError>
    where
        S: SkillStore + ?Sized,
    {
        let snapshot = self.assignments();
        info!(employee_id, rows = snapshot.len(), "Saving employee skills");

        let custom = snapshot.iter().filter(|s| s.is_custom()).count();
        if custom > 0 {
            warn!(employee_id, custom, "Saving rows that are not in the skill catalog");
        }

        match store.replace_skills(employee_id, &snapshot).await {
            Ok(canonical) => {
                self.rows = canonical.into_iter().map(SkillRow::new).collect();
                self.reindex();
                Ok(self.rows.len())
            }
            Err(source) => {
                warn!(employee_id, error = %source, "Saving employee skills failed");
                Err(SaveError { source })
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn rows(&self) -> &[SkillRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&SkillRow> {
        self.position_of(id).map(|pos| &self.rows[pos])
    }

    /// Id of the row currently at `index`
    pub fn row_id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|row| row.id)
    }

    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The list as it would be sent to the server
    pub fn assignments(&self) -> Vec<SkillAssignment> {
        self.rows.iter().map(|row| row.assignment.clone()).collect()
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn row_mut(&mut self, id: RowId) -> Option<&mut SkillAssignment> {
        let pos = self.position_of(id)?;
        Some(&mut self.rows[pos].assignment)
    }

    fn reindex(&mut self) {
        self.positions = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.id, pos))
            .collect();
    }

    fn assignment_from_resume(&self, skill: &ResumeExtractedSkill) -> SkillAssignment {
        let category_name = skill
            .category_name
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| {
                skill
                    .skill_id
                    .and_then(|sid| self.catalog.find_by_id(sid))
                    .map(|entry| entry.category_or_default().to_string())
            })
            .unwrap_or_else(|| {
                if skill.skill_id.is_some() {
                    UNCATEGORIZED.to_string()
                } else {
                    CUSTOM_CATEGORY.to_string()
                }
            });

        SkillAssignment {
            skill_id: skill.skill_id,
            skill_name: skill.skill_name.clone(),
            category_name,
            proficiency_level: skill
                .level
                .filter(|&l| l > 0)
                .unwrap_or(DEFAULT_RESUME_LEVEL)
                .min(MAX_PROFICIENCY),
            evidence: skill
                .evidence
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_RESUME_EVIDENCE.to_string()),
        }
    }
}
