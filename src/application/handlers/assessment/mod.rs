//! Adaptive assessment handlers.

mod controller;

pub use controller::{
    AnswerResult, AssessmentController, AssessmentResult, AssessmentSettings, AssessmentStep,
    CaptureAnswerCommand, CaptureAnswerResult, QuestionPrompt, StartAssessmentCommand,
    StartAssessmentResult,
};
