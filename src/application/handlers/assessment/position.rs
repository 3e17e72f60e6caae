//! AssessmentPosition - what the presentation layer shows after a step.

use serde::Serialize;

use crate::domain::assessment::{Question, Questionnaire};

/// The questionnaire cursor as seen from outside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentPosition {
    pub category: Option<String>,
    pub category_color: Option<String>,
    pub question: Option<Question>,
    pub info_text: Option<String>,
    pub progress: String,
    pub completed: bool,
}

impl AssessmentPosition {
    pub fn of(questionnaire: &Questionnaire) -> Self {
        let category = questionnaire.current_category();
        let question = questionnaire.current_question();
        Self {
            category: category.map(|c| c.name().to_string()),
            category_color: category.and_then(|c| c.color()).map(str::to_string),
            question: question.cloned(),
            info_text: question.map(Question::info_text),
            progress: questionnaire.progress_text(),
            completed: questionnaire.is_completed(),
        }
    }
}
