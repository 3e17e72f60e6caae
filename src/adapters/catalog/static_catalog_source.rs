//! Static Catalog Source Adapter
//!
//! Holds the catalogue YAML in memory. Useful for embedded catalogues and
//! tests.

use async_trait::async_trait;

use super::parse_catalog;
use crate::domain::assessment::Catalog;
use crate::ports::{CatalogError, CatalogSource};

/// In-memory catalogue source
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    yaml: String,
}

impl StaticCatalogSource {
    pub fn new(yaml: impl Into<String>) -> Self {
        Self { yaml: yaml.into() }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        parse_catalog(&self.yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_document_fails_to_parse() {
        let source = StaticCatalogSource::new("");
        assert!(matches!(source.load().await, Err(CatalogError::ParseFailed(_))));
    }
}
