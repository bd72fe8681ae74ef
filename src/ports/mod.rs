//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement these
//! ports.
//!
//! - `SessionStore` - get/put/delete of session aggregates by id
//! - `ResultLog` - best-effort append log of inference and scoring results,
//!   readable back as interest response history

mod result_log;
mod session_store;

pub use result_log::{LogError, LogRecord, ResultLog};
pub use session_store::{SessionStore, StoreError};
