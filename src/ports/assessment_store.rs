//! Assessment Store Port - Interface for keeping questionnaire snapshots.
//!
//! A stored assessment is the full serializable questionnaire state; no
//! hidden state is needed to resume it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::assessment::Questionnaire;
use crate::domain::foundation::{AssessmentId, Timestamp};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Assessment not found: {0}")]
    NotFound(AssessmentId),

    /// Backend failure of a persistent store.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A questionnaire snapshot with its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAssessment {
    pub id: AssessmentId,
    pub saved_at: Timestamp,
    pub questionnaire: Questionnaire,
}

impl StoredAssessment {
    /// Wraps a questionnaire, stamped now.
    pub fn new(id: AssessmentId, questionnaire: Questionnaire) -> Self {
        Self {
            id,
            saved_at: Timestamp::now(),
            questionnaire,
        }
    }

    /// Restamps the snapshot before it is saved again.
    pub fn touch(&mut self) {
        self.saved_at = Timestamp::now();
    }
}

/// Port for saving and loading assessments.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Save (insert or replace) an assessment.
    async fn save(&self, assessment: &StoredAssessment) -> Result<(), StoreError>;

    /// Load an assessment.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no assessment exists
    async fn load(&self, id: AssessmentId) -> Result<StoredAssessment, StoreError>;

    /// Delete an assessment. Deleting an unknown id is not an error.
    async fn delete(&self, id: AssessmentId) -> Result<(), StoreError>;

    /// Check if an assessment exists.
    async fn exists(&self, id: AssessmentId) -> Result<bool, StoreError>;
}
