//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{invalid_session_id, status_for, ErrorResponse};
use crate::application::{AssessmentController, CaptureAnswerCommand, StartAssessmentCommand};
use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{QuestionId, SessionId, UserId};

use super::dto::{
    AnswerRequest, AnswerResponse, AssessmentResultResponse, EndSessionResponse,
    ResponsesResponse, StartAssessmentResponse, StepResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    controller: Arc<AssessmentController>,
}

impl AssessmentHandlers {
    pub fn new(controller: Arc<AssessmentController>) -> Self {
        Self { controller }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/assessment/start/:user_id - Start a session and serve the first question
pub async fn start_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_assessment_error(e.into()),
    };

    match handlers.controller.start(StartAssessmentCommand { user_id }).await {
        Ok(result) => {
            let response: StartAssessmentResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/v1/assessment/:session_id/answer - Capture an answer, then serve the next question
pub async fn answer_question(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };
    let question_id = match QuestionId::new(req.question_id.clone()) {
        Ok(id) => id,
        Err(e) => return handle_assessment_error(e.into()),
    };

    let cmd = CaptureAnswerCommand {
        session_id,
        question_id,
        answer: req.answer_text(),
    };

    match handlers.controller.answer(cmd).await {
        Ok(result) => {
            let response: AnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/v1/assessment/:session_id/next - Serve the next question
pub async fn next_question(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.controller.next(session_id).await {
        Ok(step) => {
            let response: StepResponse = step.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/v1/assessment/:session_id/result - Compute the final estimate
pub async fn assessment_result(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.controller.result(session_id).await {
        Ok(result) => {
            let response: AssessmentResultResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/v1/assessment/:session_id/responses - List captured answers
pub async fn list_responses(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.controller.responses(session_id).await {
        Ok(responses) => {
            let response = ResponsesResponse::new(session_id, responses);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// DELETE /api/v1/assessment/:session_id - End a session
pub async fn end_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id(&session_id);
    };

    match handlers.controller.end(session_id).await {
        Ok(removed) => {
            let response = EndSessionResponse {
                session_id: session_id.to_string(),
                removed,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_assessment_error(error: AssessmentError) -> Response {
    let code = error.code();
    ErrorResponse::new(code, error.message()).into_response_with(status_for(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_assessment_error(AssessmentError::not_found(SessionId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_assessment_error(AssessmentError::validation("question_id", "unknown"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn busy_and_invalid_state_map_to_409() {
        let busy = handle_assessment_error(AssessmentError::busy(SessionId::new()));
        assert_eq!(busy.status(), StatusCode::CONFLICT);
        let state = handle_assessment_error(AssessmentError::invalid_state("complete"));
        assert_eq!(state.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_maps_to_500() {
        let response = handle_assessment_error(AssessmentError::storage("disk full"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
