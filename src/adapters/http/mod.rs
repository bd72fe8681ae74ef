//! HTTP adapters - REST API implementations.
//!
//! Each application service has its own HTTP adapter; [`api_router`]
//! mounts them under `/api/v1` next to `/health`.

pub mod assessment;
pub mod error;
pub mod health;
pub mod interest;
pub mod recommendation;
mod router;

pub use error::ErrorResponse;
pub use router::{api_router, AppState, HttpSettings};
