//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through
//! the ports.

pub mod assessment;
pub mod interest;
pub mod recommendation;

mod result_logging;
mod session_locks;

pub use result_logging::append_best_effort;
pub use session_locks::{SessionGuard, SessionLocks};
