use hrdesk_client::ApiError;
use thiserror::Error;

/// Client-side validation failure; the first failing check wins
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the employee's name")]
    MissingName,

    #[error("Please enter a valid email address (name@domain.tld)")]
    InvalidEmail,

    #[error("Please enter the phone number as (xxx) xxx-xxxx")]
    InvalidPhone,

    #[error("Please select a department")]
    MissingDepartment,

    #[error("Skill name is required")]
    MissingSkillName,

    #[error("Enter an employee ID or name")]
    MissingMemberReference,
}

/// Editor operation failures
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0} not found")]
    NotFound(String),

    /// The form is in view mode; call `begin_edit` first
    #[error("Record is read-only until edit mode is entered")]
    ReadOnly,

    /// Local directory store failure
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
