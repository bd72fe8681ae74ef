//! Request and response bodies for the assessment endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::{
    AnswerResult, AssessmentResult, AssessmentStep, CaptureAnswerResult, StartAssessmentResult,
};
use crate::domain::foundation::SessionId;
use crate::domain::personality::{Response, TraitAxis};

pub const ANSWER_OPTIONS: [&str; 2] = ["Yes", "No"];
pub const COMPLETE_MESSAGE: &str = "assessment complete";

/// Body of `POST /:session_id/answer`.
///
/// `answer` may be a string, a boolean or a number; it is normalized to
/// text before capture.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub answer: serde_json::Value,
}

impl AnswerRequest {
    pub fn answer_text(&self) -> String {
        match &self.answer {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Next question or the completion sentinel.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResponse {
    Question {
        question_id: String,
        text: String,
        options: Vec<String>,
        axis: String,
        current_index: usize,
        max_questions: u32,
    },
    Complete {
        message: String,
    },
}

impl From<AssessmentStep> for StepResponse {
    fn from(step: AssessmentStep) -> Self {
        match step {
            AssessmentStep::Question(prompt) => StepResponse::Question {
                question_id: prompt.question_id.to_string(),
                text: prompt.text,
                options: ANSWER_OPTIONS.iter().map(|o| o.to_string()).collect(),
                axis: prompt.axis.code().to_string(),
                current_index: prompt.current_index,
                max_questions: prompt.max_questions,
            },
            AssessmentStep::Complete => StepResponse::Complete {
                message: COMPLETE_MESSAGE.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartAssessmentResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub next: StepResponse,
}

impl From<StartAssessmentResult> for StartAssessmentResponse {
    fn from(result: StartAssessmentResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            next: result.step.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureResponse {
    pub label: String,
    pub uncertainty: f64,
    pub answered: usize,
}

impl From<CaptureAnswerResult> for CaptureResponse {
    fn from(result: CaptureAnswerResult) -> Self {
        Self {
            label: result.label.to_string(),
            uncertainty: result.uncertainty,
            answered: result.answered,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub session_id: String,
    pub captured: CaptureResponse,
    #[serde(flatten)]
    pub next: StepResponse,
}

impl From<AnswerResult> for AnswerResponse {
    fn from(result: AnswerResult) -> Self {
        Self {
            session_id: result.capture.session_id.to_string(),
            captured: result.capture.into(),
            next: result.step.into(),
        }
    }
}

/// Final result; per-axis values are keyed by axis code (`IE`, `SN`, ..).
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResultResponse {
    pub session_id: String,
    pub label: String,
    pub features: BTreeMap<&'static str, f64>,
    pub probabilities: BTreeMap<&'static str, f64>,
    pub std_dev: BTreeMap<&'static str, f64>,
    pub uncertainty: f64,
    pub confidence: f64,
    pub answered: usize,
    pub complete: bool,
}

fn by_axis(values: [f64; 4]) -> BTreeMap<&'static str, f64> {
    TraitAxis::ALL.iter().map(|axis| (axis.code(), values[axis.index()])).collect()
}

impl From<AssessmentResult> for AssessmentResultResponse {
    fn from(result: AssessmentResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            label: result.label.to_string(),
            features: by_axis(result.features),
            probabilities: by_axis(result.probabilities),
            std_dev: by_axis(result.std_dev),
            uncertainty: result.uncertainty,
            confidence: result.confidence,
            answered: result.answered,
            complete: result.complete,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseItem {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponsesResponse {
    pub session_id: String,
    pub responses: Vec<ResponseItem>,
}

impl ResponsesResponse {
    pub fn new(session_id: SessionId, responses: Vec<Response>) -> Self {
        Self {
            session_id: session_id.to_string(),
            responses: responses
                .into_iter()
                .map(|r| ResponseItem {
                    question_id: r.question_id.to_string(),
                    answer: r.answer,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub removed: bool,
}
