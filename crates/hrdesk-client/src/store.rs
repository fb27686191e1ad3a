//! [`SkillStore`] backed by the REST surface

use async_trait::async_trait;
use hrdesk_reconciler::{SkillStore, StoreError};
use hrdesk_types::{EmployeeId, SkillAssignment};

use crate::client::HrClient;
use crate::error::ApiError;

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => StoreError::Rejected { status, message },
            ApiError::Server(message) => StoreError::Rejected {
                status: 200,
                message,
            },
            ApiError::Decode(e) => StoreError::Decode(e.to_string()),
            ApiError::Network(e) => StoreError::Network(e.to_string()),
            ApiError::InvalidUrl(url) => StoreError::Network(format!("invalid URL {url}")),
        }
    }
}

#[async_trait]
impl SkillStore for HrClient {
    async fn replace_skills(
        &self,
        employee_id: EmployeeId,
        skills: &[SkillAssignment],
    ) -> Result<Vec<SkillAssignment>, StoreError> {
        Ok(self.replace_employee_skills(employee_id, skills).await?)
    }
}
