//! InterestQuizHandler - Runs interest quiz sessions and scores them.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use serde::Serialize;

use crate::application::handlers::result_logging::append_best_effort;
use crate::application::handlers::session_locks::{SessionGuard, SessionLocks};
use crate::domain::foundation::{QuestionId, SessionId, Timestamp, UserId};
use crate::domain::interest::{
    combined_confidence, InterestItemBank, InterestQuizError, InterestQuizSession, InterestScores,
    InterestStep, ReliabilityReport, ResponseHistory, RiasecCode, LIKERT_MAX, LIKERT_MIN,
};
use crate::ports::{LogRecord, ResultLog, SessionStore, StoreError};

/// A served interest item with its Likert range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestPrompt {
    pub question_id: QuestionId,
    pub text: String,
    pub code: RiasecCode,
    /// One-based position in the session's order.
    pub index: usize,
    pub total: usize,
    pub scale_min: u8,
    pub scale_max: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterestQuizStep {
    Item(InterestPrompt),
    Complete,
}

#[derive(Debug, Clone)]
pub struct StartInterestQuizCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct StartInterestQuizResult {
    pub session_id: SessionId,
    pub step: InterestQuizStep,
}

/// `value` is clamped into the Likert range by the session.
#[derive(Debug, Clone)]
pub struct AnswerInterestItemCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestQuizResult {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub code: String,
    /// Pattern clarity blended with trait reliability when history is kept.
    pub confidence: f64,
    pub pattern_confidence: f64,
    pub reliability: Option<ReliabilityReport>,
    pub scores: InterestScores,
    pub answered: usize,
    pub total: usize,
}

pub struct InterestQuizHandler {
    store: Arc<dyn SessionStore<InterestQuizSession>>,
    items: Arc<InterestItemBank>,
    log: Arc<dyn ResultLog>,
    locks: SessionLocks,
    rng: Mutex<StdRng>,
}

impl InterestQuizHandler {
    pub fn new(
        store: Arc<dyn SessionStore<InterestQuizSession>>,
        items: Arc<InterestItemBank>,
        log: Arc<dyn ResultLog>,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            items,
            log,
            locks: SessionLocks::new(),
            rng: Mutex::new(rng),
        }
    }

    pub async fn start(&self, cmd: StartInterestQuizCommand) -> Result<StartInterestQuizResult, InterestQuizError> {
        let session = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            InterestQuizSession::new(SessionId::new(), cmd.user_id, &self.items, &mut *rng)
        };
        self.store.put(session.id(), &session).await.map_err(storage)?;

        tracing::info!(
            session_id = %session.id(),
            user_id = %session.user_id(),
            items = session.total(),
            "interest quiz started"
        );
        Ok(StartInterestQuizResult {
            session_id: session.id(),
            step: self.step(&session),
        })
    }

    /// Records one answer and returns the next item.
    pub async fn answer(&self, cmd: AnswerInterestItemCommand) -> Result<InterestQuizStep, InterestQuizError> {
        let _guard = self.lock(cmd.session_id)?;
        let mut session = self.load(cmd.session_id).await?;
        session.capture(&self.items, cmd.question_id, cmd.value)?;
        self.store.put(session.id(), &session).await.map_err(storage)?;

        if session.is_complete() {
            tracing::info!(session_id = %session.id(), answered = session.answered(), "interest quiz complete");
        }
        Ok(self.step(&session))
    }

    /// Scores whatever has been answered so far, logged best-effort.
    ///
    /// Reliability is estimated from the answer sets logged before this
    /// one. Without a readable history the confidence is pattern clarity
    /// alone.
    pub async fn result(&self, session_id: SessionId) -> Result<InterestQuizResult, InterestQuizError> {
        let session = self.load(session_id).await?;
        let scores = session.scores(&self.items);
        let code = scores.code();
        let pattern_confidence = scores.confidence();
        let reliability = self
            .history()
            .await
            .map(|history| ReliabilityReport::assess(&self.items, &scores, &history));
        let confidence = combined_confidence(pattern_confidence, reliability.as_ref());

        append_best_effort(
            self.log.as_ref(),
            LogRecord::InterestScore {
                session_id,
                user_id: session.user_id().clone(),
                code: code.clone(),
                confidence,
                sums: scores.sums,
                percents: scores.percents,
                normalized: scores.normalized,
                timestamp: Timestamp::now(),
            },
        )
        .await;
        append_best_effort(
            self.log.as_ref(),
            LogRecord::InterestResponses {
                session_id,
                user_id: session.user_id().clone(),
                answers: session.answers().clone(),
                timestamp: Timestamp::now(),
            },
        )
        .await;

        tracing::info!(
            session_id = %session_id,
            code = %code,
            confidence,
            pattern_confidence,
            "interest quiz scored"
        );
        Ok(InterestQuizResult {
            session_id,
            user_id: session.user_id().clone(),
            code,
            confidence,
            pattern_confidence,
            reliability,
            scores,
            answered: session.answered(),
            total: session.total(),
        })
    }

    /// Deletes a quiz; a quiz with an answer in flight is `Busy`.
    pub async fn end(&self, session_id: SessionId) -> Result<bool, InterestQuizError> {
        let _guard = self.lock(session_id)?;
        let removed = self.store.delete(session_id).await.map_err(storage)?;
        tracing::info!(session_id = %session_id, removed, "interest quiz ended");
        Ok(removed)
    }

    async fn history(&self) -> Option<ResponseHistory> {
        match self.log.response_history().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "response history unreadable, using pattern confidence");
                None
            }
        }
    }

    fn lock(&self, session_id: SessionId) -> Result<SessionGuard, InterestQuizError> {
        self.locks
            .try_acquire(session_id)
            .ok_or_else(|| InterestQuizError::busy(session_id))
    }

    async fn load(&self, session_id: SessionId) -> Result<InterestQuizSession, InterestQuizError> {
        self.store
            .get(session_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| InterestQuizError::not_found(session_id))
    }

    fn step(&self, session: &InterestQuizSession) -> InterestQuizStep {
        match session.next_item(&self.items) {
            InterestStep::Item { item, index, total } => InterestQuizStep::Item(InterestPrompt {
                question_id: item.id.clone(),
                text: item.text.clone(),
                code: item.code,
                index,
                total,
                scale_min: LIKERT_MIN,
                scale_max: LIKERT_MAX,
            }),
            InterestStep::Complete => InterestQuizStep::Complete,
        }
    }
}

fn storage(err: StoreError) -> InterestQuizError {
    InterestQuizError::storage(err.to_string())
}
