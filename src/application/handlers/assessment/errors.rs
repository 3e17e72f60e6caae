//! Errors raised by assessment handlers.

use thiserror::Error;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StoreError;

/// Failure of an assessment command or query.
#[derive(Debug, Error)]
pub enum AssessmentHandlerError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AssessmentHandlerError> for DomainError {
    fn from(err: AssessmentHandlerError) -> Self {
        match err {
            AssessmentHandlerError::Assessment(e) => e.into(),
            AssessmentHandlerError::Store(StoreError::NotFound(id)) => {
                DomainError::new(ErrorCode::AssessmentNotFound, format!("Assessment not found: {}", id))
                    .with_detail("assessment_id", id.to_string())
            }
            AssessmentHandlerError::Store(e) => DomainError::new(ErrorCode::StorageFailure, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssessmentId;

    #[test]
    fn missing_assessment_maps_to_not_found_code() {
        let id = AssessmentId::new();
        let err: DomainError = AssessmentHandlerError::from(StoreError::NotFound(id)).into();
        assert_eq!(err.code, ErrorCode::AssessmentNotFound);
        assert_eq!(err.details.get("assessment_id"), Some(&id.to_string()));
    }
}
