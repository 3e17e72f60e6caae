//! Category - a navigable question sequence that grows with consequences.
//!
//! Questions live in an arena of slots: the default questions first, then
//! the consequence candidates. The live sequence is a list of slot indices
//! plus a cursor. Advancing past a question whose answer triggers a
//! consequence splices that consequence in right after it; retreating
//! from the consequence back onto its trigger withdraws it again.
//!
//! A withdrawn consequence keeps its answer in the arena. It still takes
//! part in condition pools and shows its previous answer if re-inserted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ConfigurationError, LookupError, Question, QuestionTag, ScoringContext, UseCase};
use crate::domain::foundation::{Level, ScoreSet};

/// Role of a category in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Global criterion weighting, always first.
    Preferences,
    /// Cross-cutting questions merged into every use-case category.
    General,
    /// A user-selectable category owning use cases.
    UseCases,
}

/// Result of moving the cursor forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Advanced,
    Exhausted,
}

/// Result of moving the cursor backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Retreated,
    AtStart,
}

/// A themed group of questions with its navigation cursor.
///
/// Invariant: `cursor <= sequence.len()`; equality means exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    kind: CategoryKind,
    color: Option<String>,
    short_name: Option<String>,
    description: Option<String>,
    criteria: Vec<String>,
    criteria_descriptions: BTreeMap<String, String>,
    slots: Vec<Question>,
    default_count: usize,
    sequence: Vec<usize>,
    cursor: usize,
    use_cases: Vec<UseCase>,
}

impl Category {
    /// Creates a category whose live sequence starts as `defaults`.
    pub fn new(
        name: impl Into<String>,
        kind: CategoryKind,
        defaults: Vec<Question>,
        consequences: Vec<Question>,
    ) -> Self {
        let default_count = defaults.len();
        let mut slots = defaults;
        slots.extend(consequences);
        Self {
            name: name.into(),
            kind,
            color: None,
            short_name: None,
            description: None,
            criteria: Vec::new(),
            criteria_descriptions: BTreeMap::new(),
            slots,
            default_count,
            sequence: (0..default_count).collect(),
            cursor: 0,
            use_cases: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<String>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_criteria_descriptions(mut self, descriptions: BTreeMap<String, String>) -> Self {
        self.criteria_descriptions = descriptions;
        self
    }

    pub fn with_use_cases(mut self, use_cases: Vec<UseCase>) -> Self {
        self.use_cases = use_cases;
        self
    }

    // ─── Navigation ─────────────────────────────────────────────────

    pub fn current_question(&self) -> Option<&Question> {
        self.sequence.get(self.cursor).map(|&slot| &self.slots[slot])
    }

    pub fn current_question_mut(&mut self) -> Option<&mut Question> {
        let slot = *self.sequence.get(self.cursor)?;
        self.slots.get_mut(slot)
    }

    /// Moves past the current question.
    ///
    /// If the question being left triggers a consequence, the consequence
    /// becomes the next question. Stepping off the last question still
    /// counts as advanced; only an already exhausted category reports
    /// `Exhausted`.
    ///
    /// # Errors
    ///
    /// `ConsequenceNotFound` if the triggered name is not a consequence
    /// candidate of this category.
    pub fn advance(&mut self) -> Result<Advance, ConfigurationError> {
        let Some(&leaving) = self.sequence.get(self.cursor) else {
            return Ok(Advance::Exhausted);
        };
        let follow_up = self.slots[leaving]
            .consequence_name()
            .map(|name| self.consequence_slot(name))
            .transpose()?;

        self.cursor += 1;
        if let Some(slot) = follow_up {
            self.sequence.insert(self.cursor, slot);
        }
        Ok(Advance::Advanced)
    }

    /// Moves back one question, withdrawing the question being left if it
    /// is the consequence of the question arrived at.
    pub fn retreat(&mut self) -> Retreat {
        if self.cursor == 0 {
            return Retreat::AtStart;
        }
        let leaving_pos = self.cursor;
        self.cursor -= 1;

        if let Some(&leaving) = self.sequence.get(leaving_pos) {
            let arriving = self.sequence[self.cursor];
            if self.slots[arriving].consequence_name() == Some(self.slots[leaving].name()) {
                self.sequence.remove(leaving_pos);
            }
        }
        Retreat::Retreated
    }

    /// Positions the cursor on the last live question.
    pub fn jump_to_last(&mut self) {
        self.cursor = self.sequence.len().saturating_sub(1);
    }

    /// Restores the default sequence and puts the cursor on its first
    /// question. Answers stay in the arena.
    pub fn reset_navigation(&mut self) {
        self.sequence = (0..self.default_count).collect();
        self.cursor = 0;
    }

    fn consequence_slot(&self, name: &str) -> Result<usize, ConfigurationError> {
        self.slots[self.default_count..]
            .iter()
            .position(|q| q.name() == name)
            .map(|offset| self.default_count + offset)
            .ok_or_else(|| ConfigurationError::ConsequenceNotFound {
                consequence: name.to_string(),
                category: self.name.clone(),
            })
    }

    // ─── Question views ─────────────────────────────────────────────

    /// The live question sequence.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sequence.iter().map(move |&slot| &self.slots[slot])
    }

    /// Live questions carrying `tag`.
    pub fn questions_tagged(&self, tag: QuestionTag) -> impl Iterator<Item = &Question> {
        self.questions().filter(move |q| q.has_tag(tag))
    }

    pub fn preference_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions_tagged(QuestionTag::Preference)
    }

    pub fn potential_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions_tagged(QuestionTag::Potential)
    }

    pub fn effort_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions_tagged(QuestionTag::Effort)
    }

    pub fn risk_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions_tagged(QuestionTag::Risk)
    }

    /// Every question template of the category, shown or not.
    pub fn all_questions(&self) -> &[Question] {
        &self.slots
    }

    /// Default questions followed by consequence candidates, plus
    /// `general`: the pool conditions are checked against.
    pub fn condition_pool<'a>(&'a self, general: &[&'a Question]) -> Vec<&'a Question> {
        general.iter().copied().chain(self.slots.iter()).collect()
    }

    // ─── Aggregation ────────────────────────────────────────────────

    /// Truncated mean of the answered risk questions, 0 if there are none.
    pub fn category_risk(&self) -> u8 {
        truncated_mean(self.risk_questions())
    }

    /// Like [`Category::category_risk`] with `general` merged in.
    pub fn combined_risk(&self, general: &[&Question]) -> u8 {
        let general_risk = general
            .iter()
            .copied()
            .filter(|q| q.has_tag(QuestionTag::Risk));
        truncated_mean(self.risk_questions().chain(general_risk))
    }

    /// Reads one weight per declared criterion from the preference
    /// questions.
    ///
    /// A preference question matches a criterion by name, falling back to
    /// a display text containing the criterion.
    pub fn criterion_weights(&self) -> Result<BTreeMap<String, Level>, ConfigurationError> {
        let mut weights = BTreeMap::new();
        for criterion in &self.criteria {
            let question = self
                .preference_questions()
                .find(|q| q.name() == criterion)
                .or_else(|| self.preference_questions().find(|q| q.text().contains(criterion.as_str())))
                .ok_or_else(|| ConfigurationError::PreferenceQuestionMissing {
                    criterion: criterion.clone(),
                    category: self.name.clone(),
                })?;
            let weight = question.value().ok_or_else(|| ConfigurationError::WeightMissing {
                criterion: criterion.clone(),
                category: self.name.clone(),
            })?;
            weights.insert(criterion.clone(), weight);
        }
        Ok(weights)
    }

    /// Decides applicability and scores every use case.
    ///
    /// Non-applicable use cases score [`ScoreSet::zero`]. `general` holds
    /// the live general questions used for risk and effort; `general_pool`
    /// holds every general question template, shown or not, for the
    /// condition checks.
    pub fn evaluate_use_cases(
        &mut self,
        weights: &BTreeMap<String, Level>,
        general: &[&Question],
        general_pool: &[&Question],
        data_dependent_criteria: &[String],
    ) -> Result<BTreeMap<String, ScoreSet>, ConfigurationError> {
        let category_risk = self.combined_risk(general);

        let Category {
            name,
            slots,
            sequence,
            use_cases,
            ..
        } = self;
        let slots = slots.as_slice();

        let pool: Vec<&Question> = general_pool.iter().copied().chain(slots.iter()).collect();
        let effort_questions: Vec<&Question> = sequence
            .iter()
            .map(|&slot| &slots[slot])
            .chain(general.iter().copied())
            .filter(|q| q.has_tag(QuestionTag::Effort))
            .collect();
        let ctx = ScoringContext {
            category: name.as_str(),
            effort_questions,
            weights,
            category_risk,
            data_dependent_criteria,
        };

        let mut scores = BTreeMap::new();
        for use_case in use_cases.iter_mut() {
            let score = if use_case.evaluate_applicability(&pool)? {
                use_case.score(&ctx)?
            } else {
                ScoreSet::zero()
            };
            scores.insert(use_case.name().to_string(), score);
        }
        Ok(scores)
    }

    // ─── Use cases ──────────────────────────────────────────────────

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn use_case(&self, name: &str) -> Result<&UseCase, LookupError> {
        self.use_cases
            .iter()
            .find(|uc| uc.name() == name)
            .ok_or_else(|| LookupError::UseCaseNotFound {
                use_case: name.to_string(),
                category: self.name.clone(),
            })
    }

    pub fn has_use_case(&self, name: &str) -> bool {
        self.use_cases.iter().any(|uc| uc.name() == name)
    }

    // ─── Accessors ──────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn criterion_description(&self, criterion: &str) -> Option<&str> {
        self.criteria_descriptions.get(criterion).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of live questions.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.sequence.len()
    }
}

fn truncated_mean<'a>(questions: impl Iterator<Item = &'a Question>) -> u8 {
    let values: Vec<u32> = questions
        .filter_map(|q| q.value())
        .map(|v| u32::from(v.value()))
        .collect();
    if values.is_empty() {
        return 0;
    }
    // Mean of 1..=5 values always fits.
    (values.iter().sum::<u32>() / values.len() as u32) as u8
}
