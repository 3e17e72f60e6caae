//! Condition - a predicate over expected question answers.

use serde::{Deserialize, Serialize};

use super::{ConfigurationError, Question};

/// Classification used to filter conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    DataAvailability,
    LabelAvailability,
    MetadataAvailability,
    UserPreference,
    DataQuality,
}

impl ConditionKind {
    /// True for the kinds whose questions drive data-dependent effort.
    pub fn concerns_data_sources(&self) -> bool {
        matches!(
            self,
            ConditionKind::DataAvailability | ConditionKind::LabelAvailability
        )
    }
}

/// One `(question, expected answer)` pair.
///
/// `question` is matched against question names first and display texts
/// second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedAnswer {
    pub question: String,
    pub answer: String,
}

impl ExpectedAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable predicate: fulfilled iff every referenced question carries
/// its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    kind: ConditionKind,
    expected: Vec<ExpectedAnswer>,
}

impl Condition {
    pub fn new(kind: ConditionKind, expected: Vec<ExpectedAnswer>) -> Self {
        Self { kind, expected }
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn expected(&self) -> &[ExpectedAnswer] {
        &self.expected
    }

    /// Evaluates the condition against a pool of questions.
    ///
    /// Stops at the first mismatching pair. A referenced question that is
    /// absent from the pool is a configuration error naming `owner`.
    /// Multi-choice answers never equal a scalar expectation.
    pub fn check(&self, pool: &[&Question], owner: &str) -> Result<bool, ConfigurationError> {
        for pair in &self.expected {
            let question = find_in_pool(pool, &pair.question).ok_or_else(|| {
                ConfigurationError::QuestionNotInPool {
                    question: pair.question.clone(),
                    use_case: owner.to_string(),
                }
            })?;
            let matches = question
                .answer()
                .and_then(|a| a.as_single())
                .is_some_and(|a| a == pair.answer);
            if !matches {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns the keys of every question this condition refers to.
    pub fn question_keys(&self) -> impl Iterator<Item = &str> {
        self.expected.iter().map(|p| p.question.as_str())
    }
}

/// Finds a question by name, falling back to display text.
pub fn find_in_pool<'a>(pool: &[&'a Question], key: &str) -> Option<&'a Question> {
    pool.iter()
        .find(|q| q.name() == key)
        .or_else(|| pool.iter().find(|q| q.text() == key))
        .copied()
}
