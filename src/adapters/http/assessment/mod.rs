//! HTTP adapter for adaptive assessment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, AnswerResponse, AssessmentResultResponse, CaptureResponse, EndSessionResponse,
    ResponsesResponse, StartAssessmentResponse, StepResponse,
};
pub use handlers::AssessmentHandlers;
pub use routes::assessment_routes;
