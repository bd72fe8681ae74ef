//! Adaptive assessment session aggregate.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AssessmentError, AssessmentStatus};
use crate::domain::bandit::{information_gain, BanditState};
use crate::domain::foundation::{
    QuestionId, SessionId, StateMachine, Timestamp, UserId, ValidationError,
};
use crate::domain::personality::{Question, QuestionBank, Response, TraitAxis, TraitLabel};

/// What the session wants to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextStep<'a> {
    Question(&'a Question),
    Complete,
}

/// One user's adaptive assessment.
///
/// Quotas are charged when a question is served (`served_counts`), so a
/// session completes after `max_questions` serves whether or not they were
/// answered. `axis_counts` grows on capture and always sums to
/// `responses.len()`. Served questions enter `asked` immediately and are
/// never served twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    id: SessionId,
    user_id: UserId,
    status: AssessmentStatus,
    target_per_axis: u32,
    responses: Vec<Response>,
    asked: BTreeSet<QuestionId>,
    axis_counts: [u32; 4],
    #[serde(default)]
    served_counts: [u32; 4],
    last_uncertainty: Option<f64>,
    last_axis: Option<TraitAxis>,
    uncertainty_history: Vec<f64>,
    label_history: Vec<TraitLabel>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AssessmentSession {
    pub fn new(
        id: SessionId,
        user_id: UserId,
        target_per_axis: u32,
    ) -> Result<Self, ValidationError> {
        if target_per_axis == 0 {
            return Err(ValidationError::out_of_range(
                "target_per_axis",
                1.0,
                f64::from(u32::MAX),
                0.0,
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            status: AssessmentStatus::Started,
            target_per_axis,
            responses: Vec::new(),
            asked: BTreeSet::new(),
            axis_counts: [0; 4],
            served_counts: [0; 4],
            last_uncertainty: None,
            last_axis: None,
            uncertainty_history: Vec::new(),
            label_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == AssessmentStatus::Complete
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn asked(&self) -> &BTreeSet<QuestionId> {
        &self.asked
    }

    pub fn axis_counts(&self) -> [u32; 4] {
        self.axis_counts
    }

    /// Questions charged against each axis quota.
    pub fn served_counts(&self) -> [u32; 4] {
        self.served_counts
    }

    pub fn served(&self) -> u32 {
        self.served_counts.iter().sum()
    }

    pub fn last_uncertainty(&self) -> Option<f64> {
        self.last_uncertainty
    }

    pub fn last_axis(&self) -> Option<TraitAxis> {
        self.last_axis
    }

    pub fn uncertainty_history(&self) -> &[f64] {
        &self.uncertainty_history
    }

    pub fn label_history(&self) -> &[TraitLabel] {
        &self.label_history
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Quota per axis times the number of axes.
    pub fn max_questions(&self) -> u32 {
        self.target_per_axis * TraitAxis::ALL.len() as u32
    }

    /// One-based position of the next question to answer.
    pub fn current_index(&self) -> usize {
        self.responses.len() + 1
    }

    /// Axes still under quota, in axis order.
    pub fn available_axes(&self) -> Vec<TraitAxis> {
        TraitAxis::ALL
            .into_iter()
            .filter(|axis| self.served_counts[axis.index()] < self.target_per_axis)
            .collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Behavior
    // ───────────────────────────────────────────────────────────────

    /// Chooses and serves the next question, or completes the session.
    ///
    /// With no responses yet the axis is uniform among those under quota;
    /// afterwards the bandit picks. When the chosen axis has no unused
    /// question left the other available axes are scanned in order.
    pub fn next_question<'a, R: Rng + ?Sized>(
        &mut self,
        bank: &'a QuestionBank,
        bandit: &BanditState,
        exploration_rate: f64,
        rng: &mut R,
    ) -> Result<NextStep<'a>, AssessmentError> {
        if self.is_complete() {
            return Ok(NextStep::Complete);
        }
        if self.served() >= self.max_questions() {
            self.complete()?;
            return Ok(NextStep::Complete);
        }

        let available = self.available_axes();
        let chosen = if self.responses.is_empty() {
            available.choose(rng).copied()
        } else {
            bandit.choose_axis(exploration_rate, &available, rng)
        };
        let Some(chosen) = chosen else {
            self.complete()?;
            return Ok(NextStep::Complete);
        };

        let fallbacks = available.iter().copied().filter(|axis| *axis != chosen);
        for axis in std::iter::once(chosen).chain(fallbacks) {
            if let Some(question) = bank.draw_unused(axis, &self.asked, rng) {
                self.serve(question)?;
                return Ok(NextStep::Question(question));
            }
        }

        self.complete()?;
        Ok(NextStep::Complete)
    }

    /// Records an answer to `question`.
    ///
    /// A question that was never served is charged against its axis quota
    /// here, so it must still fit under that quota.
    pub fn record_answer(&mut self, question: &Question, answer: &str) -> Result<(), AssessmentError> {
        if self.is_complete() {
            return Err(AssessmentError::invalid_state("assessment is already complete"));
        }
        if self.responses.iter().any(|r| &r.question_id == question.id()) {
            return Err(AssessmentError::validation(
                "question_id",
                format!("question {} was already answered", question.id()),
            ));
        }
        let axis = question.axis();
        let was_served = self.asked.contains(question.id());
        if !was_served && self.served_counts[axis.index()] >= self.target_per_axis {
            return Err(AssessmentError::validation(
                "question_id",
                format!("quota for axis {} is already met", axis),
            ));
        }

        self.responses.push(Response::new(question.id().clone(), answer));
        if !was_served {
            self.asked.insert(question.id().clone());
            self.served_counts[axis.index()] += 1;
        }
        self.axis_counts[axis.index()] += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Stores a fresh inference and returns the bandit reward it earns, if any.
    ///
    /// The reward goes to the axis that picked the last served question and
    /// is only produced when a previous uncertainty exists.
    pub fn record_inference(&mut self, uncertainty: f64, label: TraitLabel) -> Option<(TraitAxis, f64)> {
        self.uncertainty_history.push(uncertainty);
        self.label_history.push(label);
        let reward = information_gain(self.last_uncertainty, uncertainty)
            .and_then(|gain| self.last_axis.map(|axis| (axis, gain)));
        self.last_uncertainty = Some(uncertainty);
        reward
    }

    fn serve(&mut self, question: &Question) -> Result<(), AssessmentError> {
        self.status = self.status.transition_to(AssessmentStatus::Asking)?;
        self.asked.insert(question.id().clone());
        self.served_counts[question.axis().index()] += 1;
        self.last_axis = Some(question.axis());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn complete(&mut self) -> Result<(), AssessmentError> {
        self.status = self.status.transition_to(AssessmentStatus::Complete)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::personality::TraitLetter;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn question(id: usize, yes: TraitLetter, no: TraitLetter) -> Question {
        Question::new(QuestionId::new(id.to_string()).unwrap(), format!("Q{id}"), yes, no).unwrap()
    }

    fn bank(per_axis: usize) -> QuestionBank {
        let mut questions = Vec::new();
        let mut id = 1;
        for axis in TraitAxis::ALL {
            for _ in 0..per_axis {
                questions.push(question(id, axis.positive(), axis.negative()));
                id += 1;
            }
        }
        QuestionBank::new(questions).unwrap()
    }

    fn session(target: u32) -> AssessmentSession {
        AssessmentSession::new(SessionId::new(), UserId::new("u1").unwrap(), target).unwrap()
    }

    #[test]
    fn new_session_starts_empty() {
        let s = session(9);
        assert_eq!(s.status(), AssessmentStatus::Started);
        assert_eq!(s.max_questions(), 36);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.available_axes(), TraitAxis::ALL.to_vec());
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(AssessmentSession::new(SessionId::new(), UserId::new("u").unwrap(), 0).is_err());
    }

    #[test]
    fn serving_marks_question_asked() {
        let bank = bank(3);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = session(3);

        let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.1, &mut rng).unwrap() else {
            panic!("expected a question");
        };
        assert!(s.asked().contains(q.id()));
        assert_eq!(s.status(), AssessmentStatus::Asking);
        assert_eq!(s.last_axis(), Some(q.axis()));
        assert!(s.responses().is_empty());
    }

    #[test]
    fn unanswered_questions_are_never_reserved() {
        let bank = bank(2);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = session(9);
        let mut seen = HashSet::new();

        loop {
            match s.next_question(&bank, &bandit, 0.1, &mut rng).unwrap() {
                NextStep::Question(q) => assert!(seen.insert(q.id().clone())),
                NextStep::Complete => break,
            }
        }
        assert_eq!(seen.len(), 8);
        assert!(s.is_complete());
    }

    #[test]
    fn completes_after_quota_and_stays_complete() {
        let bank = bank(3);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = session(1);

        while let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.1, &mut rng).unwrap() {
            let q = q.clone();
            s.record_answer(&q, "yes").unwrap();
        }
        assert_eq!(s.responses().len(), 4);
        assert_eq!(s.axis_counts(), [1, 1, 1, 1]);
        assert_eq!(
            s.next_question(&bank, &bandit, 0.1, &mut rng).unwrap(),
            NextStep::Complete
        );
    }

    #[test]
    fn unanswered_serves_count_against_quota() {
        let bank = bank(3);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = session(1);

        let mut served = 0;
        while let NextStep::Question(_) = s.next_question(&bank, &bandit, 0.1, &mut rng).unwrap() {
            served += 1;
            assert!(served <= 4, "served {} past the quota", served);
        }
        assert_eq!(served, s.max_questions());
        assert_eq!(s.served_counts(), [1, 1, 1, 1]);
        assert!(s.responses().is_empty());
        assert!(s.is_complete());
    }

    #[test]
    fn served_question_stays_answerable_at_quota() {
        let bank = QuestionBank::new(vec![
            question(1, TraitLetter::I, TraitLetter::E),
            question(2, TraitLetter::E, TraitLetter::I),
        ])
        .unwrap();
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut s = session(1);

        let NextStep::Question(first) = s.next_question(&bank, &bandit, 0.0, &mut rng).unwrap() else {
            panic!("expected a question");
        };
        let first = first.clone();
        assert_eq!(s.next_question(&bank, &bandit, 0.0, &mut rng).unwrap(), NextStep::Complete);
        assert_eq!(s.asked().len(), 1);

        let mut s = session(1);
        let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.0, &mut rng).unwrap() else {
            panic!("expected a question");
        };
        let q = q.clone();
        s.record_answer(&q, "yes").unwrap();
        assert_eq!(s.axis_counts()[TraitAxis::Ie.index()], 1);
        assert_eq!(s.served_counts()[TraitAxis::Ie.index()], 1);
        assert_eq!(first.axis(), TraitAxis::Ie);
    }

    #[test]
    fn falls_back_to_other_axes_then_completes_when_bank_runs_dry() {
        let bank = QuestionBank::new(vec![
            question(1, TraitLetter::I, TraitLetter::E),
            question(2, TraitLetter::E, TraitLetter::I),
        ])
        .unwrap();
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = session(3);

        let mut served = 0;
        while let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.5, &mut rng).unwrap() {
            let q = q.clone();
            s.record_answer(&q, "no").unwrap();
            served += 1;
        }
        assert_eq!(served, 2);
        assert!(s.is_complete());
    }

    #[test]
    fn answering_twice_is_rejected() {
        let bank = bank(2);
        let q = bank.questions()[0].clone();
        let mut s = session(3);
        s.record_answer(&q, "yes").unwrap();
        assert!(matches!(
            s.record_answer(&q, "no"),
            Err(AssessmentError::Validation { .. })
        ));
        assert_eq!(s.responses().len(), 1);
    }

    #[test]
    fn answering_past_axis_quota_is_rejected() {
        let bank = bank(2);
        let mut s = session(1);
        s.record_answer(&bank.questions()[0], "yes").unwrap();
        assert!(matches!(
            s.record_answer(&bank.questions()[1], "yes"),
            Err(AssessmentError::Validation { .. })
        ));
    }

    #[test]
    fn answering_after_completion_is_invalid_state() {
        let bank = bank(1);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = session(1);
        while let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.0, &mut rng).unwrap() {
            let q = q.clone();
            s.record_answer(&q, "y").unwrap();
        }
        let extra = question(99, TraitLetter::T, TraitLetter::F);
        assert!(matches!(
            s.record_answer(&extra, "yes"),
            Err(AssessmentError::InvalidState(_))
        ));
    }

    #[test]
    fn first_inference_earns_no_reward() {
        let mut s = session(3);
        let label: TraitLabel = "INTJ".parse().unwrap();
        assert_eq!(s.record_inference(0.9, label), None);
        assert_eq!(s.last_uncertainty(), Some(0.9));
    }

    #[test]
    fn later_inference_rewards_last_axis() {
        let bank = bank(2);
        let bandit = BanditState::new();
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = session(3);
        let label: TraitLabel = "ESFP".parse().unwrap();

        let NextStep::Question(q) = s.next_question(&bank, &bandit, 0.0, &mut rng).unwrap() else {
            panic!("expected a question");
        };
        let axis = q.axis();
        s.record_inference(0.9, label);
        let (rewarded, gain) = s.record_inference(0.6, label).unwrap();
        assert_eq!(rewarded, axis);
        assert!((gain - 0.3).abs() < 1e-12);
        assert_eq!(s.record_inference(0.8, label), Some((axis, 0.0)));
        assert_eq!(s.uncertainty_history().len(), 3);
        assert_eq!(s.label_history().len(), 3);
    }

    #[test]
    fn round_trips_through_yaml() {
        let bank = bank(2);
        let mut s = session(2);
        s.record_answer(&bank.questions()[3], "yes").unwrap();
        let yaml = serde_yaml::to_string(&s).unwrap();
        let back: AssessmentSession = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, s);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Next,
        Answer(usize, bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Next),
            (0usize..12, any::<bool>()).prop_map(|(i, yes)| Op::Answer(i, yes)),
        ]
    }

    proptest! {
        #[test]
        fn responses_always_match_axis_counts(ops in prop::collection::vec(op(), 0..60), seed in any::<u64>()) {
            let bank = bank(3);
            let bandit = BanditState::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = session(2);

            for op in ops {
                match op {
                    Op::Next => {
                        s.next_question(&bank, &bandit, 0.2, &mut rng).unwrap();
                    }
                    Op::Answer(i, yes) => {
                        let q = bank.questions()[i].clone();
                        let _ = s.record_answer(&q, if yes { "yes" } else { "no" });
                    }
                }
                let total: u32 = s.axis_counts().iter().sum();
                prop_assert_eq!(s.responses().len(), total as usize);
                for axis in TraitAxis::ALL {
                    let i = axis.index();
                    prop_assert!(s.axis_counts()[i] <= s.served_counts()[i]);
                    prop_assert!(s.served_counts()[i] <= 2);
                }
                let unique: HashSet<_> = s.responses().iter().map(|r| r.question_id.clone()).collect();
                prop_assert_eq!(unique.len(), s.responses().len());
            }
        }
    }
}
