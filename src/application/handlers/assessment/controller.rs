//! AssessmentController - Adaptive session controller.
//!
//! Orchestrates feature building, the dropout estimator and the shared
//! bandit for every assessment session. Writes to one session are
//! serialized through [`SessionLocks`]; a concurrent writer gets
//! [`AssessmentError::Busy`].

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use serde::Serialize;

use crate::application::handlers::result_logging::append_best_effort;
use crate::application::handlers::session_locks::{SessionGuard, SessionLocks};
use crate::domain::assessment::{AssessmentError, AssessmentSession, NextStep};
use crate::domain::bandit::BanditState;
use crate::domain::estimator::{build_features, confidence_score, uncertainty_score, TraitEstimator};
use crate::domain::foundation::{QuestionId, SessionId, Timestamp, UserId};
use crate::domain::personality::{QuestionBank, Response, TraitAxis, TraitLabel};
use crate::ports::{LogRecord, ResultLog, SessionStore, StoreError};

/// Tuning knobs, usually taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentSettings {
    pub target_per_axis: u32,
    pub exploration_rate: f64,
    pub capture_samples: usize,
    pub result_samples: usize,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            target_per_axis: 9,
            exploration_rate: 0.1,
            capture_samples: 40,
            result_samples: 80,
        }
    }
}

/// A served question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPrompt {
    pub question_id: QuestionId,
    pub text: String,
    pub axis: TraitAxis,
    /// Answers so far plus one.
    pub current_index: usize,
    pub max_questions: u32,
}

/// Either the next question or the completion sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentStep {
    Question(QuestionPrompt),
    Complete,
}

#[derive(Debug, Clone)]
pub struct StartAssessmentCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session_id: SessionId,
    pub step: AssessmentStep,
}

#[derive(Debug, Clone)]
pub struct CaptureAnswerCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub answer: String,
}

/// Interim estimate after a capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureAnswerResult {
    pub session_id: SessionId,
    pub label: TraitLabel,
    pub uncertainty: f64,
    pub answered: usize,
}

/// Capture followed by next, under one session lock.
#[derive(Debug, Clone)]
pub struct AnswerResult {
    pub capture: CaptureAnswerResult,
    pub step: AssessmentStep,
}

/// Final estimate for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub session_id: SessionId,
    pub label: TraitLabel,
    pub features: [f64; 4],
    pub probabilities: [f64; 4],
    pub std_dev: [f64; 4],
    pub uncertainty: f64,
    /// Percent, two decimals.
    pub confidence: f64,
    pub answered: usize,
    pub complete: bool,
}

pub struct AssessmentController {
    store: Arc<dyn SessionStore<AssessmentSession>>,
    questions: Arc<QuestionBank>,
    estimator: Arc<TraitEstimator>,
    bandit: Arc<BanditState>,
    log: Arc<dyn ResultLog>,
    locks: SessionLocks,
    rng: Mutex<StdRng>,
    settings: AssessmentSettings,
}

impl AssessmentController {
    pub fn new(
        store: Arc<dyn SessionStore<AssessmentSession>>,
        questions: Arc<QuestionBank>,
        estimator: Arc<TraitEstimator>,
        bandit: Arc<BanditState>,
        log: Arc<dyn ResultLog>,
        rng: StdRng,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            store,
            questions,
            estimator,
            bandit,
            log,
            locks: SessionLocks::new(),
            rng: Mutex::new(rng),
            settings,
        }
    }

    pub fn bandit(&self) -> &BanditState {
        &self.bandit
    }

    /// Creates a session and serves its first question.
    pub async fn start(&self, cmd: StartAssessmentCommand) -> Result<StartAssessmentResult, AssessmentError> {
        let mut session = AssessmentSession::new(SessionId::new(), cmd.user_id, self.settings.target_per_axis)?;
        let step = self.advance(&mut session)?;
        self.store.put(session.id(), &session).await.map_err(storage)?;

        tracing::info!(
            session_id = %session.id(),
            user_id = %session.user_id(),
            max_questions = session.max_questions(),
            "assessment started"
        );
        Ok(StartAssessmentResult {
            session_id: session.id(),
            step,
        })
    }

    /// Records one answer and refreshes the interim estimate.
    pub async fn capture(&self, cmd: CaptureAnswerCommand) -> Result<CaptureAnswerResult, AssessmentError> {
        let _guard = self.lock(cmd.session_id)?;
        let mut session = self.load(cmd.session_id).await?;
        let result = self.record(&mut session, &cmd.question_id, &cmd.answer)?;
        self.store.put(session.id(), &session).await.map_err(storage)?;
        Ok(result)
    }

    /// Serves the next question or completes the session.
    pub async fn next(&self, session_id: SessionId) -> Result<AssessmentStep, AssessmentError> {
        let _guard = self.lock(session_id)?;
        let mut session = self.load(session_id).await?;
        let step = self.advance(&mut session)?;
        self.store.put(session.id(), &session).await.map_err(storage)?;
        Ok(step)
    }

    /// Capture then next.
    pub async fn answer(&self, cmd: CaptureAnswerCommand) -> Result<AnswerResult, AssessmentError> {
        let _guard = self.lock(cmd.session_id)?;
        let mut session = self.load(cmd.session_id).await?;
        let capture = self.record(&mut session, &cmd.question_id, &cmd.answer)?;
        let step = self.advance(&mut session)?;
        self.store.put(session.id(), &session).await.map_err(storage)?;
        Ok(AnswerResult { capture, step })
    }

    /// Final estimate from every captured answer, logged best-effort.
    pub async fn result(&self, session_id: SessionId) -> Result<AssessmentResult, AssessmentError> {
        let session = self.load(session_id).await?;
        let features = build_features(&self.questions, session.responses());
        let estimate = self.with_rng(|rng| {
            self.estimator
                .predict_features(&features, self.settings.result_samples, rng)
        })?;
        let uncertainty = uncertainty_score(&estimate.mean);
        let confidence = confidence_score(features.mean_distance(), estimate.mean_std_dev());

        append_best_effort(
            self.log.as_ref(),
            LogRecord::TraitInference {
                features: *features.values(),
                label: estimate.label.to_string(),
                uncertainty,
                timestamp: Timestamp::now(),
            },
        )
        .await;

        tracing::info!(
            session_id = %session_id,
            label = %estimate.label,
            uncertainty,
            confidence,
            "assessment result computed"
        );
        Ok(AssessmentResult {
            session_id,
            label: estimate.label,
            features: *features.values(),
            probabilities: estimate.mean,
            std_dev: estimate.std_dev,
            uncertainty,
            confidence,
            answered: session.responses().len(),
            complete: session.is_complete(),
        })
    }

    pub async fn responses(&self, session_id: SessionId) -> Result<Vec<Response>, AssessmentError> {
        let session = self.load(session_id).await?;
        Ok(session.responses().to_vec())
    }

    /// Deletes a session; unknown ids are fine. A session with a write in
    /// flight is `Busy`.
    pub async fn end(&self, session_id: SessionId) -> Result<bool, AssessmentError> {
        let _guard = self.lock(session_id)?;
        let removed = self.store.delete(session_id).await.map_err(storage)?;
        tracing::info!(session_id = %session_id, removed, "assessment ended");
        Ok(removed)
    }

    fn lock(&self, session_id: SessionId) -> Result<SessionGuard, AssessmentError> {
        self.locks
            .try_acquire(session_id)
            .ok_or_else(|| AssessmentError::busy(session_id))
    }

    async fn load(&self, session_id: SessionId) -> Result<AssessmentSession, AssessmentError> {
        self.store
            .get(session_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| AssessmentError::not_found(session_id))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    fn record(
        &self,
        session: &mut AssessmentSession,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<CaptureAnswerResult, AssessmentError> {
        let question = self.questions.get(question_id).ok_or_else(|| {
            AssessmentError::validation("question_id", format!("unknown question {}", question_id))
        })?;
        session.record_answer(question, answer)?;

        let features = build_features(&self.questions, session.responses());
        let estimate = self.with_rng(|rng| {
            self.estimator
                .predict_features(&features, self.settings.capture_samples, rng)
        })?;
        let uncertainty = uncertainty_score(&estimate.mean);
        if let Some((axis, reward)) = session.record_inference(uncertainty, estimate.label) {
            self.bandit.update(axis, reward);
        }

        tracing::debug!(
            session_id = %session.id(),
            question_id = %question_id,
            label = %estimate.label,
            uncertainty,
            "answer captured"
        );
        Ok(CaptureAnswerResult {
            session_id: session.id(),
            label: estimate.label,
            uncertainty,
            answered: session.responses().len(),
        })
    }

    fn advance(&self, session: &mut AssessmentSession) -> Result<AssessmentStep, AssessmentError> {
        let step = self.with_rng(|rng| {
            session.next_question(&self.questions, &self.bandit, self.settings.exploration_rate, rng)
        })?;
        Ok(match step {
            NextStep::Question(question) => AssessmentStep::Question(QuestionPrompt {
                question_id: question.id().clone(),
                text: question.text().to_string(),
                axis: question.axis(),
                current_index: session.current_index(),
                max_questions: session.max_questions(),
            }),
            NextStep::Complete => {
                tracing::info!(
                    session_id = %session.id(),
                    answered = session.responses().len(),
                    "assessment complete"
                );
                AssessmentStep::Complete
            }
        })
    }
}

fn storage(err: StoreError) -> AssessmentError {
    AssessmentError::storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::estimator::{identity_like_weights, TraitNetwork};
    use crate::domain::personality::{Question, TraitLetter};
    use crate::ports::LogError;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingLog {
        records: Mutex<Vec<LogRecord>>,
    }

    #[async_trait]
    impl ResultLog for RecordingLog {
        async fn append(&self, record: &LogRecord) -> Result<(), LogError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingLog;

    #[async_trait]
    impl ResultLog for FailingLog {
        async fn append(&self, _record: &LogRecord) -> Result<(), LogError> {
            Err(LogError::IoError("disk full".to_string()))
        }
    }

    fn bank(per_axis: usize) -> QuestionBank {
        let pairs = [
            (TraitLetter::E, TraitLetter::I),
            (TraitLetter::S, TraitLetter::N),
            (TraitLetter::T, TraitLetter::F),
            (TraitLetter::J, TraitLetter::P),
        ];
        let mut questions = Vec::new();
        for (a, (yes, no)) in pairs.into_iter().enumerate() {
            for n in 0..per_axis {
                let id = QuestionId::new(format!("{}", a * 100 + n + 1)).unwrap();
                questions.push(Question::new(id, format!("Q{}-{}", a, n), yes, no).unwrap());
            }
        }
        QuestionBank::new(questions).unwrap()
    }

    fn controller_with(log: Arc<dyn ResultLog>, per_axis: usize, target: u32) -> AssessmentController {
        let store: Arc<dyn SessionStore<AssessmentSession>> =
            Arc::new(InMemorySessionStore::<AssessmentSession>::new());
        let network = TraitNetwork::from_weights(identity_like_weights(32, 12.0)).unwrap();
        AssessmentController::new(
            store,
            Arc::new(bank(per_axis)),
            Arc::new(TraitEstimator::new(network)),
            Arc::new(BanditState::new()),
            log,
            StdRng::seed_from_u64(7),
            AssessmentSettings {
                target_per_axis: target,
                exploration_rate: 0.1,
                capture_samples: 10,
                result_samples: 20,
            },
        )
    }

    fn controller(target: u32) -> AssessmentController {
        controller_with(Arc::new(RecordingLog::default()), 3, target)
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn expect_question(step: &AssessmentStep) -> &QuestionPrompt {
        match step {
            AssessmentStep::Question(prompt) => prompt,
            AssessmentStep::Complete => panic!("expected a question"),
        }
    }

    #[tokio::test]
    async fn start_serves_first_question() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();

        let prompt = expect_question(&started.step);
        assert_eq!(prompt.current_index, 1);
        assert_eq!(prompt.max_questions, 8);
    }

    #[tokio::test]
    async fn answering_until_quota_completes_the_session() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let session_id = started.session_id;

        let mut step = started.step;
        let mut served = HashSet::new();
        let mut answers = 0;
        while let AssessmentStep::Question(prompt) = step {
            assert!(served.insert(prompt.question_id.clone()), "question served twice");
            assert_eq!(prompt.current_index, answers + 1);
            let result = controller
                .answer(CaptureAnswerCommand {
                    session_id,
                    question_id: prompt.question_id,
                    answer: if answers % 2 == 0 { "yes" } else { "no" }.to_string(),
                })
                .await
                .unwrap();
            answers += 1;
            assert_eq!(result.capture.answered, answers);
            assert!((0.0..=1.0).contains(&result.capture.uncertainty));
            step = result.step;
        }

        assert_eq!(answers, 8);
        assert_eq!(controller.next(session_id).await.unwrap(), AssessmentStep::Complete);

        let responses = controller.responses(session_id).await.unwrap();
        assert_eq!(responses.len(), 8);
        let unique: HashSet<_> = responses.iter().map(|r| &r.question_id).collect();
        assert_eq!(unique.len(), 8);
    }

    #[tokio::test]
    async fn bandit_learns_after_second_capture() {
        let controller = controller(3);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let first = expect_question(&started.step).question_id.clone();

        let answered = controller
            .answer(CaptureAnswerCommand {
                session_id: started.session_id,
                question_id: first,
                answer: "yes".to_string(),
            })
            .await
            .unwrap();
        let visits: u64 = controller.bandit().snapshot().iter().map(|a| a.visits).sum();
        assert_eq!(visits, 0);

        let second = expect_question(&answered.step).question_id.clone();
        controller
            .capture(CaptureAnswerCommand {
                session_id: started.session_id,
                question_id: second,
                answer: "yes".to_string(),
            })
            .await
            .unwrap();
        let visits: u64 = controller.bandit().snapshot().iter().map(|a| a.visits).sum();
        assert_eq!(visits, 1);
    }

    #[tokio::test]
    async fn result_is_logged_and_bounded() {
        let log = Arc::new(RecordingLog::default());
        let controller = controller_with(log.clone(), 3, 2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let question_id = expect_question(&started.step).question_id.clone();
        controller
            .capture(CaptureAnswerCommand {
                session_id: started.session_id,
                question_id,
                answer: "y".to_string(),
            })
            .await
            .unwrap();

        let result = controller.result(started.session_id).await.unwrap();
        assert_eq!(result.answered, 1);
        assert!(!result.complete);
        assert!((0.0..=100.0).contains(&result.confidence));
        assert!((0.0..=1.0).contains(&result.uncertainty));
        assert_eq!(result.label, TraitLabel::from_probabilities(&result.probabilities));

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert!(matches!(
            &records[0],
            LogRecord::TraitInference { label, features, .. }
                if *label == result.label.to_string() && *features == result.features
        ));
    }

    #[tokio::test]
    async fn log_failure_does_not_fail_result() {
        let controller = controller_with(Arc::new(FailingLog), 3, 2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        assert!(controller.result(started.session_id).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let controller = controller(2);
        let missing = SessionId::new();
        assert!(matches!(controller.next(missing).await, Err(AssessmentError::NotFound(_))));
        assert!(matches!(controller.result(missing).await, Err(AssessmentError::NotFound(_))));
        assert!(matches!(controller.responses(missing).await, Err(AssessmentError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_question_is_rejected() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let err = controller
            .capture(CaptureAnswerCommand {
                session_id: started.session_id,
                question_id: QuestionId::new("nope").unwrap(),
                answer: "yes".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AssessmentError::Validation { .. }));
    }

    #[tokio::test]
    async fn next_without_answers_stops_at_quota() {
        let controller = controller(1);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let mut served = HashSet::new();
        served.insert(expect_question(&started.step).question_id.clone());

        loop {
            match controller.next(started.session_id).await.unwrap() {
                AssessmentStep::Question(prompt) => {
                    assert!(served.insert(prompt.question_id));
                    assert!(served.len() <= 4, "served past the quota");
                }
                AssessmentStep::Complete => break,
            }
        }
        assert_eq!(served.len(), 4);
        assert_eq!(controller.next(started.session_id).await.unwrap(), AssessmentStep::Complete);
    }

    #[tokio::test]
    async fn end_with_writer_in_flight_is_busy() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        {
            let _held = controller.locks.try_acquire(started.session_id).unwrap();
            assert!(matches!(
                controller.end(started.session_id).await,
                Err(AssessmentError::Busy(_))
            ));
        }
        assert!(controller.end(started.session_id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_writer_is_busy() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();
        let _held = controller.locks.try_acquire(started.session_id).unwrap();

        assert!(matches!(
            controller.next(started.session_id).await,
            Err(AssessmentError::Busy(_))
        ));
    }

    #[tokio::test]
    async fn axis_running_dry_falls_back_then_completes() {
        // one question per axis but a quota of two
        let controller = controller_with(Arc::new(RecordingLog::default()), 1, 2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();

        let mut step = started.step;
        let mut answers = 0;
        while let AssessmentStep::Question(prompt) = step {
            step = controller
                .answer(CaptureAnswerCommand {
                    session_id: started.session_id,
                    question_id: prompt.question_id,
                    answer: "no".to_string(),
                })
                .await
                .unwrap()
                .step;
            answers += 1;
        }
        assert_eq!(answers, 4);
    }

    #[tokio::test]
    async fn end_is_idempotent() {
        let controller = controller(2);
        let started = controller.start(StartAssessmentCommand { user_id: user() }).await.unwrap();

        assert!(controller.end(started.session_id).await.unwrap());
        assert!(!controller.end(started.session_id).await.unwrap());
        assert!(matches!(
            controller.next(started.session_id).await,
            Err(AssessmentError::NotFound(_))
        ));
    }
}
