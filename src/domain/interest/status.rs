//! Interest quiz lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestQuizStatus {
    InProgress,
    Complete,
}

impl StateMachine for InterestQuizStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            InterestQuizStatus::InProgress => vec![InterestQuizStatus::Complete],
            InterestQuizStatus::Complete => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_only_moves_to_complete() {
        assert!(InterestQuizStatus::InProgress.can_transition_to(&InterestQuizStatus::Complete));
        assert!(!InterestQuizStatus::InProgress.is_terminal());
        assert!(InterestQuizStatus::Complete.is_terminal());
    }
}
