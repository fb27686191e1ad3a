//! Persistence seam for the skill list

use async_trait::async_trait;
use hrdesk_types::{EmployeeId, SkillAssignment};
use thiserror::Error;

/// Message shown to the user whenever a skill save fails
pub const SAVE_FAILED_MESSAGE: &str =
    "Error saving skills, please ensure all skill names are picked from the list.";

/// Replace-all storage for an employee's skills
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Replace every skill of `employee_id` with `skills`
    ///
    /// Returns the list as the server now holds it, including identifiers
    /// it assigned to custom skills.
    async fn replace_skills(
        &self,
        employee_id: EmployeeId,
        skills: &[SkillAssignment],
    ) -> Result<Vec<SkillAssignment>, StoreError>;
}

/// Failure reported by a [`SkillStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error
    #[error("Rejected by server ({status}): {message}")]
    Rejected {
        /// HTTP status (200 when the error came in a successful response)
        status: u16,
        /// Server-provided message
        message: String,
    },

    /// The response could not be understood
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// A save that left the in-memory list unchanged
#[derive(Debug, Error)]
#[error("Saving skills failed: {source}")]
pub struct SaveError {
    #[source]
    pub source: StoreError,
}

impl SaveError {
    /// Copy for the user-facing dialog
    ///
    /// Every cause maps to the same advice; `source` keeps the detail.
    pub fn user_message(&self) -> &'static str {
        SAVE_FAILED_MESSAGE
    }
}
