//! YAML Catalog Source Adapter
//!
//! Reads the assessment catalogue from a YAML file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::parse_catalog;
use crate::domain::assessment::Catalog;
use crate::ports::{CatalogError, CatalogSource};

/// File-based catalogue source
#[derive(Debug, Clone)]
pub struct YamlCatalogSource {
    path: PathBuf,
}

impl YamlCatalogSource {
    /// Create a source for the catalogue file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let source = YamlCatalogSource::new("./catalog/sample_catalog.yaml");
    /// let catalog = source.load().await?;
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for YamlCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.display().to_string()));
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::IoError(e.to_string()))?;

        let catalog = parse_catalog(&yaml)?;
        tracing::info!(
            path = %self.path.display(),
            categories = catalog.categories().len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
selection_prompt: Welche Kategorien?
global_criteria:
  effort: [{ name: Kostenaufwand }]
  potential: [{ name: Energieeffizienz }]
preferences:
  name: Präferenzen
general:
  name: Allgemeine Fragen
  questions: [history]
categories:
  - name: Rohrnetz
    questions: [history_2]
questions:
  - name: history
    text: Wie weit reicht Ihre Datenhistorie zurück?
    options: [Unter 1 Jahr, Über 1 Jahr]
  - name: history_2
    text: Werden Messdaten archiviert?
    options: [Ja, Nein]
category_ranking:
  Rohrnetz: { Kostenaufwand: 3, Energieeffizienz: 4 }
"#;

    async fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("catalog.yaml");
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn loads_valid_catalog_file() {
        let dir = TempDir::new().unwrap();
        let source = YamlCatalogSource::new(write(&dir, CATALOG).await);

        let catalog = source.load().await.unwrap();

        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.general().name(), "Allgemeine Fragen");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = YamlCatalogSource::new(dir.path().join("absent.yaml"));

        assert!(matches!(source.load().await, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn malformed_yaml_fails_to_parse() {
        let dir = TempDir::new().unwrap();
        let source = YamlCatalogSource::new(write(&dir, "selection_prompt: [unclosed").await);

        assert!(matches!(source.load().await, Err(CatalogError::ParseFailed(_))));
    }

    #[tokio::test]
    async fn inconsistent_catalog_is_invalid() {
        let dir = TempDir::new().unwrap();
        let broken = CATALOG.replace("questions: [history_2]", "questions: [ghost]");
        let source = YamlCatalogSource::new(write(&dir, &broken).await);

        assert!(matches!(source.load().await, Err(CatalogError::Invalid(_))));
    }
}
