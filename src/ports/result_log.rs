//! Result Log Port - Best-effort append-only record of computed results.
//!
//! Callers never fail a request because of this port: append errors are
//! logged at `warn` and dropped. A log may also hand back the answer sets
//! it has kept, which feed the interest reliability estimates.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::foundation::{QuestionId, SessionId, Timestamp, UserId};
use crate::domain::interest::{ResponseHistory, RiasecScores};

/// Errors that can occur while appending a record
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to encode record: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode history: {0}")]
    DecodingFailed(String),
}

/// One loggable result.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    /// A final trait inference.
    TraitInference {
        /// Feature ratios in IE, SN, TF, JP order, the network's input.
        features: [f64; 4],
        label: String,
        uncertainty: f64,
        timestamp: Timestamp,
    },
    /// A scored interest quiz.
    InterestScore {
        session_id: SessionId,
        user_id: UserId,
        code: String,
        confidence: f64,
        sums: RiasecScores,
        percents: RiasecScores,
        normalized: RiasecScores,
        timestamp: Timestamp,
    },
    /// The item-level answers behind a scored interest quiz.
    InterestResponses {
        session_id: SessionId,
        user_id: UserId,
        answers: BTreeMap<QuestionId, u8>,
        timestamp: Timestamp,
    },
    /// A recommendation response.
    Recommendation {
        label: String,
        clusters: Vec<String>,
        timestamp: Timestamp,
    },
}

/// Port for appending result records.
#[async_trait]
pub trait ResultLog: Send + Sync {
    async fn append(&self, record: &LogRecord) -> Result<(), LogError>;

    /// Every `InterestResponses` answer set appended so far. `None` when
    /// this log keeps no history.
    async fn response_history(&self) -> Result<Option<ResponseHistory>, LogError> {
        Ok(None)
    }
}
