//! UseCase - a catalogued candidate solution and its scoring rules.
//!
//! # Scoring
//!
//! - Effort: per predefined effort criterion, the predefined level scaled by
//!   the mean value of the matching answered effort questions
//!   (`max(predefined / 5 * mean, 1)`), or the predefined level unchanged
//!   if no question matches. Averaged over the criteria.
//! - Potential: per predefined potential criterion,
//!   `max(predefined * weight / 5, 1)`, averaged over the criteria.
//! - Risk: mean of the category risk and the predefined risk.
//!
//! Contributions are floored at 1 and never capped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Condition, ConfigurationError, ExpectedAnswer, Question};
use crate::domain::foundation::{Level, ScoreSet};

/// Arguments shared by every use case of one category evaluation.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    /// Category name, used in error messages.
    pub category: &'a str,
    /// Effort-tagged questions visible to the category.
    pub effort_questions: Vec<&'a Question>,
    /// Local criterion weights of the category.
    pub weights: &'a BTreeMap<String, Level>,
    /// Integer category risk.
    pub category_risk: u8,
    /// Effort criteria restricted to the use case's own data sources.
    pub data_dependent_criteria: &'a [String],
}

/// Arguments for and against a use case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProContra {
    #[serde(default)]
    pub pro: Vec<String>,
    #[serde(default)]
    pub contra: Vec<String>,
}

/// A use case template with its applicability state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    name: String,
    description: String,
    literature_source: Option<String>,
    pro_contra: ProContra,
    predefined_potential: BTreeMap<String, Level>,
    predefined_effort: BTreeMap<String, Level>,
    predefined_risk: Level,
    conditions: Vec<Condition>,
    is_applicable: bool,
    non_applicability_reasons: Vec<Vec<ExpectedAnswer>>,
}

impl UseCase {
    pub fn new(
        name: impl Into<String>,
        predefined_potential: BTreeMap<String, Level>,
        predefined_effort: BTreeMap<String, Level>,
        predefined_risk: Level,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            literature_source: None,
            pro_contra: ProContra::default(),
            predefined_potential,
            predefined_effort,
            predefined_risk,
            conditions: Vec::new(),
            is_applicable: true,
            non_applicability_reasons: Vec::new(),
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_literature_source(mut self, source: impl Into<String>) -> Self {
        self.literature_source = Some(source.into());
        self
    }

    pub fn with_pro_contra(mut self, pro_contra: ProContra) -> Self {
        self.pro_contra = pro_contra;
        self
    }

    /// Re-evaluates applicability against the question pool.
    ///
    /// Every condition is checked; each fulfilled one adds its expected
    /// answers to the reasons. Previous reasons are discarded.
    pub fn evaluate_applicability(&mut self, pool: &[&Question]) -> Result<bool, ConfigurationError> {
        let mut reasons = Vec::new();
        for condition in &self.conditions {
            if condition.check(pool, &self.name)? {
                reasons.push(condition.expected().to_vec());
            }
        }
        self.is_applicable = reasons.is_empty();
        self.non_applicability_reasons = reasons;
        Ok(self.is_applicable)
    }

    /// Combines predefined effort with the answered effort questions.
    pub fn compute_effort(&self, effort_questions: &[&Question], data_dependent_criteria: &[String]) -> f64 {
        if self.predefined_effort.is_empty() {
            return 0.0;
        }
        let data_sources: Vec<&str> = self.data_source_keys().collect();

        let total: f64 = self
            .predefined_effort
            .iter()
            .map(|(criterion, predefined)| {
                let restrict = data_dependent_criteria.iter().any(|c| c == criterion);
                let values: Vec<f64> = effort_questions
                    .iter()
                    .filter(|q| q.criterion() == Some(criterion.as_str()))
                    .filter(|q| !restrict || data_sources.iter().any(|k| q.is_identified_by(k)))
                    .filter_map(|q| q.value())
                    .map(|v| v.as_f64())
                    .collect();

                if values.is_empty() {
                    predefined.as_f64()
                } else {
                    let mean = values.iter().sum::<f64>() / values.len() as f64;
                    (predefined.fraction() * mean).max(1.0)
                }
            })
            .sum();

        total / self.predefined_effort.len() as f64
    }

    /// Weights the predefined potential with the local criterion weights.
    pub fn compute_potential(
        &self,
        weights: &BTreeMap<String, Level>,
        category: &str,
    ) -> Result<f64, ConfigurationError> {
        if self.predefined_potential.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (criterion, predefined) in &self.predefined_potential {
            let weight = weights
                .get(criterion)
                .ok_or_else(|| ConfigurationError::WeightMissing {
                    criterion: criterion.clone(),
                    category: category.to_string(),
                })?;
            total += (predefined.as_f64() * weight.fraction()).max(1.0);
        }
        Ok(total / self.predefined_potential.len() as f64)
    }

    /// Averages category risk with the predefined risk.
    pub fn compute_risk(&self, category_risk: u8) -> f64 {
        (category_risk as f64 + self.predefined_risk.as_f64()) / 2.0
    }

    /// Computes all three scores.
    pub fn score(&self, ctx: &ScoringContext<'_>) -> Result<ScoreSet, ConfigurationError> {
        Ok(ScoreSet::new(
            self.compute_potential(ctx.weights, ctx.category)?,
            self.compute_effort(&ctx.effort_questions, ctx.data_dependent_criteria),
            self.compute_risk(ctx.category_risk),
        ))
    }

    /// Question keys referenced by data- and label-availability conditions.
    pub fn data_source_keys(&self) -> impl Iterator<Item = &str> {
        self.conditions
            .iter()
            .filter(|c| c.kind().concerns_data_sources())
            .flat_map(|c| c.question_keys())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn literature_source(&self) -> Option<&str> {
        self.literature_source.as_deref()
    }

    pub fn pro_contra(&self) -> &ProContra {
        &self.pro_contra
    }

    pub fn predefined_potential(&self) -> &BTreeMap<String, Level> {
        &self.predefined_potential
    }

    pub fn predefined_effort(&self) -> &BTreeMap<String, Level> {
        &self.predefined_effort
    }

    pub fn predefined_risk(&self) -> Level {
        self.predefined_risk
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_applicable(&self) -> bool {
        self.is_applicable
    }

    pub fn non_applicability_reasons(&self) -> &[Vec<ExpectedAnswer>] {
        &self.non_applicability_reasons
    }
}
