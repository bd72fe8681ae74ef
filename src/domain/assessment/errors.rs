//! Assessment-specific error types.

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Errors raised by assessment operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// No session with this id.
    NotFound(SessionId),
    /// Input failed validation.
    Validation { field: String, message: String },
    /// Another request is already writing to this session.
    Busy(SessionId),
    /// Operation not allowed in the current status.
    InvalidState(String),
    /// Session store failure.
    Storage(String),
}

impl AssessmentError {
    pub fn not_found(id: SessionId) -> Self {
        AssessmentError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AssessmentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn busy(id: SessionId) -> Self {
        AssessmentError::Busy(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        AssessmentError::InvalidState(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        AssessmentError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::NotFound(_) => ErrorCode::SessionNotFound,
            AssessmentError::Validation { .. } => ErrorCode::ValidationFailed,
            AssessmentError::Busy(_) => ErrorCode::SessionBusy,
            AssessmentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AssessmentError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AssessmentError::NotFound(id) => format!("Session not found: {}", id),
            AssessmentError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AssessmentError::Busy(id) => {
                format!("Session {} is handling another request", id)
            }
            AssessmentError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AssessmentError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssessmentError {}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        AssessmentError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
