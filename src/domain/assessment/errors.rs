//! Error types for the assessment domain.
//!
//! Configuration errors mean the static catalogue is broken and abort the
//! current operation. Lookup errors are recoverable "not found" results.
//! A missing answer is never an error; navigation reports it as a step.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// The static catalogue is inconsistent with what the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Question '{question}' not found for use case '{use_case}'")]
    QuestionNotInPool { question: String, use_case: String },

    #[error("Consequence question '{consequence}' was not found in category '{category}'")]
    ConsequenceNotFound {
        consequence: String,
        category: String,
    },

    #[error("No preference question for criterion '{criterion}' in category '{category}'")]
    PreferenceQuestionMissing { criterion: String, category: String },

    #[error("Criterion '{criterion}' has no weight in category '{category}'")]
    WeightMissing { criterion: String, category: String },

    #[error("Ranking table has no entry for criterion '{criterion}' of category '{category}'")]
    RankingEntryMissing { category: String, criterion: String },

    #[error("Use case name '{use_case}' was found more than once")]
    DuplicateUseCase { use_case: String },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Question text '{text}' is shared by several questions visible to category '{category}'")]
    DuplicateQuestionText { text: String, category: String },

    #[error("Answer '{answer}' is not an option of question '{question}'")]
    AnswerOutOfDomain { question: String, answer: String },

    #[error("Multi-choice question '{question}' cannot declare {feature}")]
    MultiChoiceUnsupported {
        question: String,
        feature: &'static str,
    },

    #[error("Question '{question}' is tagged {tag} but has no answer value map")]
    MissingValueMap { question: String, tag: String },

    #[error("Unknown {kind} '{name}' referenced by '{referenced_by}'")]
    UnknownReference {
        kind: &'static str,
        name: String,
        referenced_by: String,
    },

    #[error("Use case '{use_case}' scores criterion '{criterion}' not declared by category '{category}'")]
    UndeclaredCriterion {
        use_case: String,
        criterion: String,
        category: String,
    },

    #[error("Category '{category}' has no questions")]
    EmptyCategory { category: String },

    #[error("Invalid value in '{context}': {source}")]
    InvalidValue {
        context: String,
        #[source]
        source: ValidationError,
    },
}

impl ConfigurationError {
    /// Shorthand for an unresolved reference.
    pub fn unknown(
        kind: &'static str,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Self {
        ConfigurationError::UnknownReference {
            kind,
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}

/// A requested entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Use case '{use_case}' could not be found in category '{category}'")]
    UseCaseNotFound { use_case: String, category: String },

    #[error("Use case '{use_case}' can not be found in any category")]
    UseCaseUnassigned { use_case: String },

    #[error("Category '{category}' is not part of this assessment")]
    CategoryNotFound { category: String },
}

/// Any failure raised by questionnaire operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("No category is active: {0}")]
    NoActiveCategory(&'static str),
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        let code = match &err {
            AssessmentError::Configuration(_) => ErrorCode::ConfigurationInvalid,
            AssessmentError::Lookup(_) => ErrorCode::UnknownEntity,
            AssessmentError::NoActiveCategory(_) => ErrorCode::NoActiveCategory,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_not_in_pool_names_question_and_use_case() {
        let err = ConfigurationError::QuestionNotInPool {
            question: "Liegen Durchflussdaten vor?".to_string(),
            use_case: "Leckageortung".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Question 'Liegen Durchflussdaten vor?' not found for use case 'Leckageortung'"
        );
    }

    #[test]
    fn assessment_error_is_transparent_over_configuration() {
        let err: AssessmentError = ConfigurationError::DuplicateUseCase {
            use_case: "Clustering".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Use case name 'Clustering' was found more than once"
        );
    }

    #[test]
    fn lookup_errors_map_to_not_found_code() {
        let err: DomainError = AssessmentError::from(LookupError::UseCaseUnassigned {
            use_case: "x".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::UnknownEntity);
    }
}
