//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Catalogue sources (YAML file, in-memory)
//! - `storage` - Assessment stores (in-memory)

pub mod catalog;
pub mod storage;

pub use catalog::{parse_catalog, StaticCatalogSource, YamlCatalogSource};
pub use storage::InMemoryAssessmentStore;
