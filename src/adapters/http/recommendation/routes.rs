//! HTTP routes for the recommendation endpoint.

use axum::{routing::post, Router};

use super::handlers::{recommend_clusters, RecommendationHandlers};

/// Creates the recommendation router, mounted under `/api/v1/clusters`.
pub fn recommendation_routes(handlers: RecommendationHandlers) -> Router {
    Router::new()
        .route("/recommend", post(recommend_clusters))
        .with_state(handlers)
}
