//! AnswerQuestionHandler - Command handler for answering the current
//! question.

use std::sync::Arc;

use crate::domain::assessment::Answer;
use crate::domain::foundation::AssessmentId;
use crate::ports::AssessmentStore;

use super::{AssessmentHandlerError, AssessmentPosition};

/// Command to answer the current question.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub assessment_id: AssessmentId,
    pub answer: Answer,
}

/// Result of answering.
#[derive(Debug, Clone)]
pub struct AnswerQuestionResult {
    /// False if the answer was empty and nothing was recorded.
    pub recorded: bool,
    pub position: AssessmentPosition,
}

/// Handler for answering questions.
pub struct AnswerQuestionHandler {
    store: Arc<dyn AssessmentStore>,
}

impl AnswerQuestionHandler {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
    ) -> Result<AnswerQuestionResult, AssessmentHandlerError> {
        let mut assessment = self.store.load(cmd.assessment_id).await?;

        let recorded = assessment.questionnaire.answer_current(cmd.answer)?;
        if recorded {
            assessment.touch();
            self.store.save(&assessment).await?;
            tracing::debug!(
                assessment_id = %cmd.assessment_id,
                question = assessment.questionnaire.current_question().map(|q| q.name()),
                "Answer recorded"
            );
        } else {
            tracing::warn!(assessment_id = %cmd.assessment_id, "Empty answer ignored");
        }

        Ok(AnswerQuestionResult {
            recorded,
            position: AssessmentPosition::of(&assessment.questionnaire),
        })
    }
}
