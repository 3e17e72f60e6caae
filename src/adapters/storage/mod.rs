//! Storage Adapters
//!
//! Implementations of the AssessmentStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryAssessmentStore** - Stores assessments in memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryAssessmentStore;
//!
//! let store = InMemoryAssessmentStore::new();
//! ```

mod in_memory_assessment_store;

pub use in_memory_assessment_store::InMemoryAssessmentStore;
