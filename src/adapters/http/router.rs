//! Top-level router: mounts every endpoint group and applies the
//! trace, CORS and timeout middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::assessment::{assessment_routes, AssessmentHandlers};
use super::health::health_check;
use super::interest::{interest_routes, InterestHandlers};
use super::recommendation::{recommendation_routes, RecommendationHandlers};
use crate::application::{AssessmentController, InterestQuizHandler, RecommendClustersHandler};

/// Application services the routes dispatch to.
#[derive(Clone)]
pub struct AppState {
    pub assessment: Arc<AssessmentController>,
    pub interest: Arc<InterestQuizHandler>,
    pub recommendation: Arc<RecommendClustersHandler>,
}

/// Middleware settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Allowed origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub fn api_router(state: AppState, settings: &HttpSettings) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/v1/assessment",
            assessment_routes(AssessmentHandlers::new(state.assessment)),
        )
        .nest("/api/v1/interest", interest_routes(InterestHandlers::new(state.interest)))
        .nest(
            "/api/v1/clusters",
            recommendation_routes(RecommendationHandlers::new(state.recommendation)),
        )
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
