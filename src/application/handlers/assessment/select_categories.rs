//! SelectCategoriesHandler - Command handler for answering the category
//! selection question.

use std::sync::Arc;

use crate::domain::assessment::Selection;
use crate::domain::foundation::AssessmentId;
use crate::ports::AssessmentStore;

use super::{AssessmentHandlerError, AssessmentPosition};

/// Command to choose the categories of an assessment.
#[derive(Debug, Clone)]
pub struct SelectCategoriesCommand {
    pub assessment_id: AssessmentId,
    pub categories: Vec<String>,
}

/// Result of a category selection.
#[derive(Debug, Clone)]
pub struct SelectCategoriesResult {
    pub selection: Selection,
    pub position: AssessmentPosition,
}

/// Handler for category selection.
pub struct SelectCategoriesHandler {
    store: Arc<dyn AssessmentStore>,
}

impl SelectCategoriesHandler {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: SelectCategoriesCommand,
    ) -> Result<SelectCategoriesResult, AssessmentHandlerError> {
        let mut assessment = self.store.load(cmd.assessment_id).await?;

        let selection = assessment.questionnaire.select_categories(&cmd.categories)?;
        match selection {
            Selection::NoAnswer => {
                tracing::warn!(assessment_id = %cmd.assessment_id, "No category selected");
            }
            Selection::Started => {
                assessment.touch();
                self.store.save(&assessment).await?;
                tracing::info!(
                    assessment_id = %cmd.assessment_id,
                    categories = ?assessment.questionnaire.chosen_categories(),
                    "Categories selected"
                );
            }
        }

        Ok(SelectCategoriesResult {
            selection,
            position: AssessmentPosition::of(&assessment.questionnaire),
        })
    }
}
