//! Catalog Source Port - Interface for loading the assessment catalogue.
//!
//! The catalogue is read once at startup and treated as immutable for the
//! lifetime of the process.

use async_trait::async_trait;

use crate::domain::assessment::{Catalog, ConfigurationError};

/// Errors that can occur while loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Port for loading a validated catalogue.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalogue.
    ///
    /// # Errors
    /// - `NotFound` / `IoError` if the source cannot be read
    /// - `ParseFailed` if the document is malformed
    /// - `Invalid` if the document is inconsistent
    async fn load(&self) -> Result<Catalog, CatalogError>;
}
