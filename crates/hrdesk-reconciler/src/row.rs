use hrdesk_types::SkillAssignment;
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a row, assigned when the row is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A skill assignment plus the identifier the editor addresses it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRow {
    pub id: RowId,
    pub assignment: SkillAssignment,
}

impl SkillRow {
    pub fn new(assignment: SkillAssignment) -> Self {
        Self {
            id: RowId::new(),
            assignment,
        }
    }
}
