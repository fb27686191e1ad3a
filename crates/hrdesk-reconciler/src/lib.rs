//! hrdesk Skill Reconciler
//!
//! Owns the editable list of an employee's skills and keeps it consistent with
//! the skill catalog and with skills extracted from a resume.
//!
//! - Rows carry a [`RowId`] assigned at creation, so edits never depend on a
//!   position that a removal may have shifted.
//! - Every user action is a [`SkillCommand`]; [`reduce`] applies one to a state
//!   and reports a [`CommandOutcome`].
//! - [`SkillStats`] are pure functions over the list and the employee's projects.
//! - Saving goes through the [`SkillStore`] seam and adopts whatever list the
//!   store reports back.

pub mod catalog;
pub mod command;
pub mod reconciler;
pub mod render;
pub mod row;
pub mod stats;
pub mod store;

pub use catalog::SkillCatalog;
pub use command::{reduce, CommandOutcome, SkillCommand, Transition};
pub use reconciler::{MergeCounts, SkillReconciler};
pub use render::{render_table, Dispatcher, Renderer, TextRenderer};
pub use row::{RowId, SkillRow};
pub use stats::SkillStats;
pub use store::{SaveError, SkillStore, StoreError, SAVE_FAILED_MESSAGE};
