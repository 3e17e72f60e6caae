//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, AssessmentHandlerError,
    AssessmentPosition, AssessmentResults, Direction, GetResultsHandler, GetResultsQuery,
    NavigateCommand, NavigateHandler, NavigateResult, SelectCategoriesCommand,
    SelectCategoriesHandler, SelectCategoriesResult, StartAssessmentCommand,
    StartAssessmentHandler, StartAssessmentResult,
};
