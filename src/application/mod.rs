//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! It owns single-writer-per-session enforcement and best-effort result
//! logging; the algorithms themselves live in the domain.

pub mod handlers;

pub use handlers::assessment::{
    AnswerResult, AssessmentController, AssessmentResult, AssessmentSettings, AssessmentStep,
    CaptureAnswerCommand, CaptureAnswerResult, QuestionPrompt, StartAssessmentCommand,
    StartAssessmentResult,
};
pub use handlers::interest::{
    AnswerInterestItemCommand, InterestPrompt, InterestQuizHandler, InterestQuizResult,
    InterestQuizStep, StartInterestQuizCommand, StartInterestQuizResult,
};
pub use handlers::recommendation::{
    RecommendClustersCommand, RecommendClustersHandler, RecommendClustersResult,
};
