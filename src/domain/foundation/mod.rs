//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types and the state-machine
//! trait that the assessment and interest quiz aggregates build on, plus
//! the integrity warnings data loaders report.

mod errors;
mod ids;
mod integrity;
mod rounding;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{QuestionId, SessionId, UserId};
pub use integrity::IntegrityWarning;
pub use rounding::round2;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
