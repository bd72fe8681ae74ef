//! HTTP routes for assessment endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    answer_question, assessment_result, end_assessment, list_responses, next_question,
    start_assessment, AssessmentHandlers,
};

/// Creates the assessment router, mounted under `/api/v1/assessment`.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/start/:user_id", post(start_assessment))
        .route("/:session_id/answer", post(answer_question))
        .route("/:session_id/next", post(next_question))
        .route("/:session_id/result", post(assessment_result))
        .route("/:session_id/responses", get(list_responses))
        .route("/:session_id", delete(end_assessment))
        .with_state(handlers)
}
