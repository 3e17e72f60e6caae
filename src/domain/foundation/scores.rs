//! Potential / Effort / Risk score triple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three output scores of an assessment, each roughly on the 1..5 range.
///
/// Contributions are floored at 1 during aggregation but never capped,
/// so values above 5 are possible when weights and predefined scores
/// multiply above baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    #[serde(rename = "Potential")]
    pub potential: f64,
    #[serde(rename = "Effort")]
    pub effort: f64,
    #[serde(rename = "Risk")]
    pub risk: f64,
}

impl ScoreSet {
    /// Creates a score set.
    pub fn new(potential: f64, effort: f64, risk: f64) -> Self {
        Self {
            potential,
            effort,
            risk,
        }
    }

    /// The all-zero score set used for non-applicable use cases.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if every score is zero.
    pub fn is_zero(&self) -> bool {
        self.potential == 0.0 && self.effort == 0.0 && self.risk == 0.0
    }
}

impl fmt::Display for ScoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Potential {:.2} / Effort {:.2} / Risk {:.2}",
            self.potential, self.effort, self.risk
        )
    }
}
