//! HTTP adapter for cluster recommendations.

mod dto;
mod handlers;
mod routes;

pub use dto::{RecommendRequest, RecommendResponse};
pub use handlers::RecommendationHandlers;
pub use routes::recommendation_routes;
