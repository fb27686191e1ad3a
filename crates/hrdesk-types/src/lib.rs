//! hrdesk Types - Core types shared by the hrdesk crates
//!
//! Field names follow the HR server's JSON exactly (including its historical
//! spellings such as `profiencylevel` and `skillCategoryname`), so every type
//! here can be sent to or read from the REST surface without translation.

pub mod employee;
pub mod project;
pub mod session;
pub mod skill;

pub use employee::{initials, Department, DirectoryEntry, Employee, EmployeeDraft, EmployeeId};
pub use project::{
    EmployeeProject, MemberRequest, MemberRoleUpdate, Project, ProjectId, ProjectMember,
    ProjectSkill, ProjectUpdate, ACTIVE_PROJECT_STATUS, DEFAULT_MEMBER_ROLE,
};
pub use session::{ActionResponse, SessionInfo};
pub use skill::{
    level_label, CategoryId, ManagerSkill, ManagerSkillDraft, ResumeExtractedSkill,
    ResumeUploadResponse, SkillAssignment, SkillCatalogEntry, SkillCategory, SkillId,
    CUSTOM_CATEGORY, DEFAULT_RESUME_EVIDENCE, DEFAULT_RESUME_LEVEL, MAX_PROFICIENCY,
    UNCATEGORIZED,
};
