//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (levels, scores, IDs, errors)
//! - `assessment` - Questions, conditions, categories, use cases and the questionnaire
//! - `analysis` - Pure domain services for category scoring

pub mod analysis;
pub mod assessment;
pub mod foundation;
