//! HTTP handlers for interest quiz endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{invalid_session_id, status_for, ErrorResponse};
use crate::application::{AnswerInterestItemCommand, InterestQuizHandler, StartInterestQuizCommand};
use crate::domain::foundation::{QuestionId, SessionId, UserId};
use crate::domain::interest::InterestQuizError;

use super::dto::{
    EndInterestQuizResponse, InterestAnswerRequest, InterestResultResponse, InterestStepResponse,
    StartInterestQuizResponse,
};

#[derive(Clone)]
pub struct InterestHandlers {
    quiz: Arc<InterestQuizHandler>,
}

impl InterestHandlers {
    pub fn new(quiz: Arc<InterestQuizHandler>) -> Self {
        Self { quiz }
    }
}

/// POST /api/v1/interest/start/:user_id - Start a quiz and serve the first item
pub async fn start_quiz(State(handlers): State<InterestHandlers>, Path(user_id): Path<String>) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_interest_error(e.into()),
    };

    match handlers.quiz.start(StartInterestQuizCommand { user_id }).await {
        Ok(result) => {
            let response: StartInterestQuizResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_interest_error(e),
    }
}

/// POST /api/v1/interest/:session_id/answer - Capture a Likert answer, then serve the next item
pub async fn answer_item(
    State(handlers): State<InterestHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<InterestAnswerRequest>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };
    let question_id = match QuestionId::new(req.question_id.clone()) {
        Ok(id) => id,
        Err(e) => return handle_interest_error(e.into()),
    };

    let cmd = AnswerInterestItemCommand {
        session_id,
        question_id,
        value: req.likert_value(),
    };

    match handlers.quiz.answer(cmd).await {
        Ok(step) => {
            let response: InterestStepResponse = step.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interest_error(e),
    }
}

/// POST /api/v1/interest/:session_id/result - Score the quiz
pub async fn quiz_result(State(handlers): State<InterestHandlers>, Path(session_id): Path<String>) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.quiz.result(session_id).await {
        Ok(result) => {
            let response: InterestResultResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interest_error(e),
    }
}

/// DELETE /api/v1/interest/:session_id - End a quiz
pub async fn end_quiz(State(handlers): State<InterestHandlers>, Path(session_id): Path<String>) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.quiz.end(session_id).await {
        Ok(removed) => {
            let response = EndInterestQuizResponse {
                session_id: session_id.to_string(),
                removed,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interest_error(e),
    }
}

fn handle_interest_error(error: InterestQuizError) -> Response {
    let code = error.code();
    ErrorResponse::new(code, error.message()).into_response_with(status_for(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interest_errors_map_to_statuses() {
        let id = SessionId::new();
        assert_eq!(handle_interest_error(InterestQuizError::not_found(id)).status(), StatusCode::NOT_FOUND);
        assert_eq!(handle_interest_error(InterestQuizError::busy(id)).status(), StatusCode::CONFLICT);
        assert_eq!(
            handle_interest_error(InterestQuizError::invalid_state("complete")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_interest_error(InterestQuizError::validation("question_id", "empty")).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
