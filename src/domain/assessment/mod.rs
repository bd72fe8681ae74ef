//! Adaptive assessment: the per-user session aggregate and its lifecycle.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{AssessmentSession, NextStep};
pub use errors::AssessmentError;
pub use status::AssessmentStatus;
