//! StartAssessmentHandler - Command handler for opening a new assessment.

use std::sync::Arc;

use crate::domain::assessment::{Catalog, Question, Questionnaire};
use crate::domain::foundation::AssessmentId;
use crate::ports::{AssessmentStore, StoredAssessment};

use super::AssessmentHandlerError;

/// Command to start a new assessment.
#[derive(Debug, Clone, Default)]
pub struct StartAssessmentCommand;

/// Result of starting an assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub assessment_id: AssessmentId,
    /// The category selection question to present first.
    pub selection_question: Question,
}

/// Handler for starting assessments.
pub struct StartAssessmentHandler {
    catalog: Arc<Catalog>,
    store: Arc<dyn AssessmentStore>,
}

impl StartAssessmentHandler {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn AssessmentStore>) -> Self {
        Self { catalog, store }
    }

    pub async fn handle(
        &self,
        _cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, AssessmentHandlerError> {
        let questionnaire = Questionnaire::new(&self.catalog);
        let selection_question = questionnaire.init_question().clone();

        let assessment = StoredAssessment::new(AssessmentId::new(), questionnaire);
        self.store.save(&assessment).await?;

        tracing::info!(assessment_id = %assessment.id, "Assessment started");

        Ok(StartAssessmentResult {
            assessment_id: assessment.id,
            selection_question,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::assessment::test_support::{catalog, store};

    #[tokio::test]
    async fn start_stores_unstarted_questionnaire() {
        let store = store();
        let handler = StartAssessmentHandler::new(catalog(), store.clone());

        let result = handler.handle(StartAssessmentCommand).await.unwrap();

        let stored = store.load(result.assessment_id).await.unwrap();
        assert!(!stored.questionnaire.is_started());
        assert!(result.selection_question.is_multi_choice());
        assert_eq!(
            result.selection_question.options(),
            &["Rohrnetz".to_string(), "Pumpen".to_string()]
        );
    }
}
