//! Interest quiz error types.

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Errors raised by interest quiz operations.
#[derive(Debug, Clone, PartialEq)]
pub enum InterestQuizError {
    NotFound(SessionId),
    Validation { field: String, message: String },
    Busy(SessionId),
    InvalidState(String),
    Storage(String),
}

impl InterestQuizError {
    pub fn not_found(id: SessionId) -> Self {
        InterestQuizError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InterestQuizError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn busy(id: SessionId) -> Self {
        InterestQuizError::Busy(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        InterestQuizError::InvalidState(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        InterestQuizError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterestQuizError::NotFound(_) => ErrorCode::SessionNotFound,
            InterestQuizError::Validation { .. } => ErrorCode::ValidationFailed,
            InterestQuizError::Busy(_) => ErrorCode::SessionBusy,
            InterestQuizError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            InterestQuizError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            InterestQuizError::NotFound(id) => format!(
                "Quiz session not found: {}. It may have expired; please restart the quiz.",
                id
            ),
            InterestQuizError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            InterestQuizError::Busy(id) => format!("Quiz session {} is handling another request", id),
            InterestQuizError::InvalidState(msg) => format!("Invalid state: {}", msg),
            InterestQuizError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for InterestQuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InterestQuizError {}

impl From<ValidationError> for InterestQuizError {
    fn from(err: ValidationError) -> Self {
        InterestQuizError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_suggests_restart() {
        let err = InterestQuizError::not_found(SessionId::new());
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
        assert!(err.to_string().contains("restart"));
    }
}
