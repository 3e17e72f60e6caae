//! Catalogue configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::catalog::YamlCatalogSource;

/// Where the assessment catalogue is read from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the YAML catalogue
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl CatalogConfig {
    /// A catalogue source reading the configured file
    pub fn source(&self) -> YamlCatalogSource {
        YamlCatalogSource::new(self.path.clone())
    }

    /// Validate catalogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CATALOG__PATH"));
        }
        match self.path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(()),
            _ => Err(ValidationError::InvalidCatalogExtension(
                self.path.display().to_string(),
            )),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("catalog/sample_catalog.yaml")
}
