//! HTTP routes for interest quiz endpoints.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{answer_item, end_quiz, quiz_result, start_quiz, InterestHandlers};

/// Creates the interest quiz router, mounted under `/api/v1/interest`.
pub fn interest_routes(handlers: InterestHandlers) -> Router {
    Router::new()
        .route("/start/:user_id", post(start_quiz))
        .route("/:session_id/answer", post(answer_item))
        .route("/:session_id/result", post(quiz_result))
        .route("/:session_id", delete(end_quiz))
        .with_state(handlers)
}
