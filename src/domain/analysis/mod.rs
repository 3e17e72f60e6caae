//! Analysis Module - Pure domain services for assessment scoring.
//!
//! Stateless functions that operate on domain objects and return computed
//! results. No ports or adapters needed since there's no I/O.
//!
//! # Components
//!
//! - `CategoryBaseline` - Potential and effort of a category from the
//!   ranking table and the global criterion weights

mod category_baseline;

pub use category_baseline::CategoryBaseline;
