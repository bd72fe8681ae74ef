//! Assessment session lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of an adaptive assessment.
///
/// `Started` only exists between creation and the first served question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Started,
    Asking,
    Complete,
}

impl StateMachine for AssessmentStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use AssessmentStatus::*;
        match self {
            Started => vec![Asking, Complete],
            Asking => vec![Asking, Complete],
            Complete => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_can_ask_or_finish_immediately() {
        assert!(AssessmentStatus::Started.can_transition_to(&AssessmentStatus::Asking));
        assert!(AssessmentStatus::Started.can_transition_to(&AssessmentStatus::Complete));
    }

    #[test]
    fn asking_loops_until_complete() {
        assert!(AssessmentStatus::Asking.can_transition_to(&AssessmentStatus::Asking));
        assert!(!AssessmentStatus::Asking.can_transition_to(&AssessmentStatus::Started));
    }

    #[test]
    fn complete_is_terminal() {
        assert!(AssessmentStatus::Complete.is_terminal());
        assert!(AssessmentStatus::Complete
            .transition_to(AssessmentStatus::Asking)
            .is_err());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AssessmentStatus::Complete).unwrap(),
            "\"complete\""
        );
    }
}
