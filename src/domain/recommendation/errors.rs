//! Recommendation error types.

use crate::domain::foundation::{ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationError {
    /// Request input failed validation.
    Validation { field: String, message: String },
}

impl RecommendationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RecommendationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RecommendationError::Validation { .. } => ErrorCode::ValidationFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RecommendationError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }
}

impl std::fmt::Display for RecommendationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RecommendationError {}

impl From<ValidationError> for RecommendationError {
    fn from(err: ValidationError) -> Self {
        RecommendationError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
