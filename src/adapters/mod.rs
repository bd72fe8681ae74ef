//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `storage` - Session stores (in-memory, YAML files)
//! - `logging` - Result logs (CSV, null)
//! - `catalog` - Startup loaders for question banks, weights and lookup tables
//! - `http` - axum REST adapter

pub mod catalog;
pub mod http;
pub mod logging;
pub mod storage;

pub use catalog::{Catalog, CatalogError};
pub use logging::{CsvResultLog, NullResultLog};
pub use storage::{FileSessionStore, InMemorySessionStore};
