//! State machine trait for session status enums.
//!
//! Both the adaptive assessment and the interest quiz move through a small
//! set of statuses. Implementors list their legal moves once and get
//! checked transitions for free.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for AssessmentStatus {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Started => vec![Asking, Complete],
///             Asking => vec![Asking, Complete],
///             Complete => vec![],
///         }
///     }
/// }
///
/// let next = status.transition_to(AssessmentStatus::Complete)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if moving from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs a checked transition.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot move from {:?} to {:?}", self, target),
            ))
        }
    }

    /// True when no outgoing transitions exist.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
