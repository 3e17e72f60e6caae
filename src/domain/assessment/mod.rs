//! Assessment module - questions, conditions, categories, use cases and
//! the questionnaire that drives them.
//!
//! # Components
//!
//! - `Question` - answerable unit with value mapping and consequences
//! - `Condition` - predicate over expected answers
//! - `Category` - navigable question sequence with consequence insertion
//! - `UseCase` - applicability and Potential/Effort/Risk scoring
//! - `Questionnaire` - two-phase evaluation over the chosen categories
//! - `Catalog` - validated read-only configuration

mod catalog;
mod category;
mod condition;
mod errors;
mod question;
mod questionnaire;
mod use_case;

pub use catalog::{
    Catalog, CatalogDocument, CategoryDocument, ConditionDocument, CriterionDocument,
    GlobalCriteria, GlobalCriteriaDocument, QuestionDocument, ScoringSettings, SectionDocument,
    UseCaseDocument, SELECTION_QUESTION_NAME,
};
pub use category::{Advance, Category, CategoryKind, Retreat};
pub use condition::{find_in_pool, Condition, ConditionKind, ExpectedAnswer};
pub use errors::{AssessmentError, ConfigurationError, LookupError};
pub use question::{Answer, Question, QuestionInfo, QuestionTag, DEFAULT_PREFERENCE_PROMPT};
pub use questionnaire::{Questionnaire, Selection, Step, UseCaseSummary};
pub use use_case::{ProContra, ScoringContext, UseCase};
