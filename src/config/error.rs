//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("target_per_axis must be at least 1")]
    InvalidTargetPerAxis,

    #[error("{0} must be at least 1")]
    InvalidSampleCount(&'static str),

    #[error("{field} must be within [0, 1], got {value}")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("top_k must be at least 1")]
    InvalidTopK,
}
