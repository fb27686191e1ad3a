//! hrdesk editors
//!
//! Stateful front-ends over the HR client: the employee record form, the
//! manager's skill catalog, the project detail panel, the employee skills
//! dashboard and the locally mirrored employee directory.

pub mod catalog_editor;
pub mod directory;
pub mod employee_editor;
pub mod error;
pub mod project_panel;
pub mod skills_session;
pub mod validation;

pub use catalog_editor::CatalogEditor;
pub use directory::{entry_from_employee, filter_entries, EmployeeDirectory};
pub use employee_editor::{fallback_departments, load_departments, EditorMode, EmployeeEditor};
pub use error::{EditorError, ValidationError};
pub use project_panel::ProjectPanel;
pub use skills_session::SkillsDashboard;
