//! Runtime settings for embedding the assessment engine.
//!
//! Two sections exist: where the catalogue YAML lives and how log output
//! is shaped. Both are read from `USECASE_ASSESSMENT__<SECTION>__<KEY>`
//! variables, optionally seeded from a `.env` file.
//!
//! ```no_run
//! use usecase_assessment::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! init_tracing(&config.logging).expect("tracing");
//! let source = config.catalog.source();
//! ```

mod catalog;
mod error;
mod logging;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "USECASE_ASSESSMENT";

/// Settings root; an empty environment yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    ///
    /// `USECASE_ASSESSMENT__CATALOG__PATH=/srv/catalog.yaml` sets
    /// `catalog.path`; scalar values such as `LOGGING__JSON=true` are parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);

        let settings = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.catalog.validate()?;
        self.logging.validate()
    }
}
