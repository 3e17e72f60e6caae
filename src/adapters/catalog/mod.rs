//! Catalog Adapters
//!
//! Implementations of the CatalogSource port.
//!
//! ## Available Adapters
//!
//! - **YamlCatalogSource** - Reads the catalogue from a YAML file
//! - **StaticCatalogSource** - Holds the catalogue YAML in memory

mod static_catalog_source;
mod yaml_catalog_source;

pub use static_catalog_source::StaticCatalogSource;
pub use yaml_catalog_source::YamlCatalogSource;

use crate::domain::assessment::{Catalog, CatalogDocument};
use crate::ports::CatalogError;

/// Parses and validates a YAML catalogue document.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument =
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
    Ok(Catalog::from_document(document)?)
}
