//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogSource` - Loads the validated assessment catalogue
//! - `AssessmentStore` - Keeps questionnaire snapshots between steps

mod assessment_store;
mod catalog_source;

pub use assessment_store::{AssessmentStore, StoreError, StoredAssessment};
pub use catalog_source::{CatalogError, CatalogSource};
