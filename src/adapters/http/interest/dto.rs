//! Request and response bodies for the interest quiz endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{InterestQuizResult, InterestQuizStep, StartInterestQuizResult};
use crate::domain::interest::{ReliabilityReport, RiasecScores, LIKERT_MIN};

pub const COMPLETE_MESSAGE: &str = "interest quiz complete";

/// Body of `POST /:session_id/answer`.
#[derive(Debug, Clone, Deserialize)]
pub struct InterestAnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl InterestAnswerRequest {
    /// Coerces the value to an integer: numbers truncate, numeric strings
    /// parse, anything else reads as the scale minimum. The session clamps
    /// the result into range.
    pub fn likert_value(&self) -> i64 {
        let fallback = i64::from(LIKERT_MIN);
        match &self.value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(fallback),
            serde_json::Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| {
                        s.parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite())
                            .map(|f| f.trunc() as i64)
                    })
                    .unwrap_or(fallback)
            }
            _ => fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterestStepResponse {
    Question {
        question_id: String,
        text: String,
        code: String,
        index: usize,
        total: usize,
        choices: Vec<u8>,
    },
    Complete {
        message: String,
    },
}

impl From<InterestQuizStep> for InterestStepResponse {
    fn from(step: InterestQuizStep) -> Self {
        match step {
            InterestQuizStep::Item(prompt) => InterestStepResponse::Question {
                question_id: prompt.question_id.to_string(),
                text: prompt.text,
                code: prompt.code.to_string(),
                index: prompt.index,
                total: prompt.total,
                choices: (prompt.scale_min..=prompt.scale_max).collect(),
            },
            InterestQuizStep::Complete => InterestStepResponse::Complete {
                message: COMPLETE_MESSAGE.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartInterestQuizResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub next: InterestStepResponse,
}

impl From<StartInterestQuizResult> for StartInterestQuizResponse {
    fn from(result: StartInterestQuizResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            next: result.step.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterestResultResponse {
    pub session_id: String,
    pub user_id: String,
    pub code: String,
    pub confidence: f64,
    pub pattern_confidence: f64,
    /// Per-scale alpha, SEM, 95% interval and percentile; absent when no
    /// response history is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<ReliabilityReport>,
    /// Raw totals; pass these as `raw_scores` to the recommender.
    pub sums: RiasecScores,
    pub percents: RiasecScores,
    pub normalized: RiasecScores,
    pub answered: usize,
    pub total: usize,
}

impl From<InterestQuizResult> for InterestResultResponse {
    fn from(result: InterestQuizResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            user_id: result.user_id.to_string(),
            code: result.code,
            confidence: result.confidence,
            pattern_confidence: result.pattern_confidence,
            reliability: result.reliability,
            sums: result.scores.sums,
            percents: result.scores.percents,
            normalized: result.scores.normalized,
            answered: result.answered,
            total: result.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EndInterestQuizResponse {
    pub session_id: String,
    pub removed: bool,
}
