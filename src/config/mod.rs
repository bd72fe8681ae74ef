//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `INTEREST_PROFILER`
//! prefix and `__` between nested keys. Every section has defaults, so an
//! empty environment yields a runnable development configuration.
//!
//! # Example
//!
//! ```no_run
//! use interest_profiler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod assessment;
mod data;
mod error;
mod recommender;
mod server;
mod storage;

pub use assessment::AssessmentConfig;
pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use recommender::RecommenderConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Adaptive assessment tuning
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Signal fusion weights
    #[serde(default)]
    pub recommender: RecommenderConfig,

    /// Catalog file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Session store selection
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INTEREST_PROFILER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INTEREST_PROFILER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INTEREST_PROFILER__ASSESSMENT__TARGET_PER_AXIS=9` -> `assessment.target_per_axis = 9`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTEREST_PROFILER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assessment.validate()?;
        self.recommender.validate()?;
        self.data.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
