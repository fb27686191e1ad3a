use hrdesk_types::{SkillCatalogEntry, SkillId};
use std::collections::HashMap;

/// Case-insensitive name lookup over the skill catalog
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    entries: Vec<SkillCatalogEntry>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<SkillId, usize>,
}

impl SkillCatalog {
    pub fn new(entries: Vec<SkillCatalogEntry>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        // First entry wins when names collide case-insensitively.
        for (pos, entry) in entries.iter().enumerate() {
            by_name.entry(entry.skill_name.to_lowercase()).or_insert(pos);
            by_id.entry(entry.skill_id).or_insert(pos);
        }
        Self {
            entries,
            by_name,
            by_id,
        }
    }

    /// Entry whose name equals `name` ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&SkillCatalogEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&pos| &self.entries[pos])
    }

    pub fn find_by_id(&self, id: SkillId) -> Option<&SkillCatalogEntry> {
        self.by_id.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Entries whose name contains `term` ignoring case, for name suggestions
    pub fn suggest(&self, term: &str) -> Vec<&SkillCatalogEntry> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.skill_name.to_lowercase().contains(&term))
            .collect()
    }

    pub fn entries(&self) -> &[SkillCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
