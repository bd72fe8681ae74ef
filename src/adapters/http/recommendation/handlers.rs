//! HTTP handlers for the recommendation endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::application::RecommendClustersHandler;
use crate::domain::recommendation::RecommendationError;

use super::dto::{RecommendRequest, RecommendResponse};

#[derive(Clone)]
pub struct RecommendationHandlers {
    recommend_handler: Arc<RecommendClustersHandler>,
}

impl RecommendationHandlers {
    pub fn new(recommend_handler: Arc<RecommendClustersHandler>) -> Self {
        Self { recommend_handler }
    }
}

/// POST /api/v1/clusters/recommend - Rank outcome categories
pub async fn recommend_clusters(
    State(handlers): State<RecommendationHandlers>,
    Json(req): Json<RecommendRequest>,
) -> Response {
    match handlers.recommend_handler.handle(req.into()).await {
        Ok(result) => {
            let response: RecommendResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_recommendation_error(e),
    }
}

fn handle_recommendation_error(error: RecommendationError) -> Response {
    let code = error.code();
    ErrorResponse::new(code, error.message()).into_response_with(status_for(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = handle_recommendation_error(RecommendationError::validation("label", "empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
