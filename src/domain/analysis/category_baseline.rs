//! Category Baseline - potential and effort of a category before any of its
//! questions are answered.

use std::collections::BTreeMap;

use crate::domain::assessment::{ConfigurationError, ScoringSettings};
use crate::domain::foundation::{Level, ScoreSet};

/// Baseline category scoring from the ranking table and global weights.
pub struct CategoryBaseline;

impl CategoryBaseline {
    /// Scores one category against the global criterion weights.
    ///
    /// # Algorithm
    /// For each group (effort, potential):
    /// mean over its criteria of `max(weight / 5 * ranking[category][criterion], 1)`.
    /// Risk starts at 0 and is finalised when the category is evaluated.
    ///
    /// # Edge Cases
    /// - Empty group: scores 0
    /// - Missing weight: `WeightMissing`
    /// - Missing ranking row or entry: `RankingEntryMissing`
    pub fn score(
        category: &str,
        weights: &BTreeMap<String, Level>,
        settings: &ScoringSettings,
    ) -> Result<ScoreSet, ConfigurationError> {
        let effort = Self::group_score(category, &settings.global_criteria.effort, weights, settings)?;
        let potential =
            Self::group_score(category, &settings.global_criteria.potential, weights, settings)?;
        Ok(ScoreSet::new(potential, effort, 0.0))
    }

    fn group_score(
        category: &str,
        criteria: &[String],
        weights: &BTreeMap<String, Level>,
        settings: &ScoringSettings,
    ) -> Result<f64, ConfigurationError> {
        if criteria.is_empty() {
            return Ok(0.0);
        }

        let mut total = 0.0;
        for criterion in criteria {
            let weight = weights
                .get(criterion)
                .ok_or_else(|| ConfigurationError::WeightMissing {
                    criterion: criterion.clone(),
                    category: category.to_string(),
                })?;
            let ranked = settings
                .category_ranking
                .get(category)
                .and_then(|row| row.get(criterion))
                .ok_or_else(|| ConfigurationError::RankingEntryMissing {
                    category: category.to_string(),
                    criterion: criterion.clone(),
                })?;
            total += (weight.fraction() * ranked.as_f64()).max(1.0);
        }
        Ok(total / criteria.len() as f64)
    }
}
