//! In-Memory Assessment Store Adapter
//!
//! Keeps questionnaire snapshots in memory for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::AssessmentId;
use crate::ports::{AssessmentStore, StoreError, StoredAssessment};

/// In-memory storage for assessments
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentStore {
    assessments: Arc<RwLock<HashMap<AssessmentId, StoredAssessment>>>,
}

impl InMemoryAssessmentStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored assessments
    pub async fn len(&self) -> usize {
        self.assessments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assessments.read().await.is_empty()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn save(&self, assessment: &StoredAssessment) -> Result<(), StoreError> {
        let mut assessments = self.assessments.write().await;
        assessments.insert(assessment.id, assessment.clone());
        Ok(())
    }

    async fn load(&self, id: AssessmentId) -> Result<StoredAssessment, StoreError> {
        let assessments = self.assessments.read().await;
        assessments.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: AssessmentId) -> Result<(), StoreError> {
        self.assessments.write().await.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: AssessmentId) -> Result<bool, StoreError> {
        Ok(self.assessments.read().await.contains_key(&id))
    }
}
