//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - Stores sessions as YAML files on disk
//! - **InMemorySessionStore** - Stores sessions in memory (default)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! let store = FileSessionStore::<AssessmentSession>::new("./data/sessions/assessment");
//! let store = InMemorySessionStore::<InterestQuizSession>::new();
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
