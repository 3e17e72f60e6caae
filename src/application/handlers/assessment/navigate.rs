//! NavigateHandler - Command handler for moving through the questionnaire.

use std::sync::Arc;

use crate::domain::assessment::Step;
use crate::domain::foundation::AssessmentId;
use crate::ports::AssessmentStore;

use super::{AssessmentHandlerError, AssessmentPosition};

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Command to move the questionnaire cursor.
#[derive(Debug, Clone)]
pub struct NavigateCommand {
    pub assessment_id: AssessmentId,
    pub direction: Direction,
}

/// Result of a navigation step.
#[derive(Debug, Clone)]
pub struct NavigateResult {
    pub step: Step,
    pub position: AssessmentPosition,
}

/// Handler for navigation.
pub struct NavigateHandler {
    store: Arc<dyn AssessmentStore>,
}

impl NavigateHandler {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: NavigateCommand) -> Result<NavigateResult, AssessmentHandlerError> {
        let mut assessment = self.store.load(cmd.assessment_id).await?;
        let questionnaire = &mut assessment.questionnaire;

        let step = match cmd.direction {
            Direction::Next => questionnaire.next_question()?,
            Direction::Previous => questionnaire.previous_question()?,
        };

        match step {
            Step::NoAnswer => {
                tracing::warn!(assessment_id = %cmd.assessment_id, "Current question has no answer");
            }
            Step::Completed => {
                tracing::info!(assessment_id = %cmd.assessment_id, "Assessment completed");
            }
            Step::CategoryEntered => {
                tracing::info!(
                    assessment_id = %cmd.assessment_id,
                    category = questionnaire.current_category().map(|c| c.name()),
                    "Category entered"
                );
            }
            Step::Question | Step::AtStart => {
                tracing::debug!(
                    assessment_id = %cmd.assessment_id,
                    step = ?step,
                    progress = %questionnaire.progress_text(),
                    "Navigated"
                );
            }
        }

        let position = AssessmentPosition::of(&assessment.questionnaire);
        if step != Step::NoAnswer {
            assessment.touch();
            self.store.save(&assessment).await?;
        }

        Ok(NavigateResult { step, position })
    }
}
