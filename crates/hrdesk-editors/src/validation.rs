//! Synchronous form checks run before any submission

use hrdesk_types::{DirectoryEntry, EmployeeDraft};
use regex::Regex;
use tracing::warn;

use crate::error::ValidationError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^\(\d{3}\) \d{3}-\d{4}$";

fn matches(pattern: &str, value: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            warn!("Failed to compile validation pattern {}: {}", pattern, e);
            false
        }
    }
}

/// `local@domain.tld` shape; empty is accepted
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || matches(EMAIL_PATTERN, email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// `(xxx) xxx-xxxx` shape; empty is accepted
pub fn check_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() || matches(PHONE_PATTERN, phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Employee form with separate first and last names
pub fn validate_employee(draft: &EmployeeDraft) -> Result<(), ValidationError> {
    if draft.firstname.trim().is_empty() || draft.lastname.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    check_email(&draft.email)?;
    check_phone(&draft.phone)?;
    if draft.department.trim().is_empty() {
        return Err(ValidationError::MissingDepartment);
    }
    Ok(())
}

/// Directory record with a single full-name field
pub fn validate_directory_entry(entry: &DirectoryEntry) -> Result<(), ValidationError> {
    if entry.full_name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    check_email(&entry.email)?;
    if entry.department.trim().is_empty() {
        return Err(ValidationError::MissingDepartment);
    }
    Ok(())
}
