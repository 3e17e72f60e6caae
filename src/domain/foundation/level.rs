//! Level value object for the 1..=5 assessment scale.
//!
//! Answer values, criterion weights, predefined use case scores and the
//! category ranking table all live on this scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value on the 1 (low) to 5 (high) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Lowest value on the scale.
    pub const MIN: u8 = 1;
    /// Highest value on the scale, also the normalisation divisor in scoring.
    pub const MAX: u8 = 5;

    /// Creates a Level, returning error if out of range.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range("level", Self::MIN, Self::MAX, value))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a float for score arithmetic.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Returns the value as a fraction of the scale maximum (0.2 ..= 1.0).
    pub fn fraction(&self) -> f64 {
        self.as_f64() / Self::MAX as f64
    }

    /// Returns every level in ascending order.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN..=Self::MAX).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
