//! HTTP adapter for interest quiz endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    EndInterestQuizResponse, InterestAnswerRequest, InterestResultResponse, InterestStepResponse,
    StartInterestQuizResponse,
};
pub use handlers::InterestHandlers;
pub use routes::interest_routes;
