//! Assessment command and query handlers.

mod answer_question;
mod errors;
mod get_results;
mod navigate;
mod position;
mod select_categories;
mod start_assessment;

#[cfg(test)]
mod test_support;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult};
pub use errors::AssessmentHandlerError;
pub use get_results::{AssessmentResults, GetResultsHandler, GetResultsQuery};
pub use navigate::{Direction, NavigateCommand, NavigateHandler, NavigateResult};
pub use position::AssessmentPosition;
pub use select_categories::{
    SelectCategoriesCommand, SelectCategoriesHandler, SelectCategoriesResult,
};
pub use start_assessment::{StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult};
