//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, AssessmentHandlerError,
    AssessmentPosition, AssessmentResults, Direction, GetResultsHandler, GetResultsQuery,
    NavigateCommand, NavigateHandler, NavigateResult, SelectCategoriesCommand,
    SelectCategoriesHandler, SelectCategoriesResult, StartAssessmentCommand,
    StartAssessmentHandler, StartAssessmentResult,
};
