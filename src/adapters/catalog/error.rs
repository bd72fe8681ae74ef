//! Catalog loading errors. All of them are fatal at startup.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("{path} row {row}: {message}")]
    InvalidRow {
        path: String,
        row: usize,
        message: String,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid content in {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: ValidationError,
    },
}

impl CatalogError {
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn missing_column(path: impl Into<String>, column: impl Into<String>) -> Self {
        CatalogError::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn invalid_row(path: impl Into<String>, row: usize, message: impl Into<String>) -> Self {
        CatalogError::InvalidRow {
            path: path.into(),
            row,
            message: message.into(),
        }
    }

    pub fn parse(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid(path: impl Into<String>, source: ValidationError) -> Self {
        CatalogError::Invalid {
            path: path.into(),
            source,
        }
    }
}
