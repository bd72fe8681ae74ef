//! Interest quiz session aggregate.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::scoring::{score_answers, InterestScores, LIKERT_MAX, LIKERT_MIN};
use super::{InterestItem, InterestItemBank, InterestQuizError, InterestQuizStatus};
use crate::domain::foundation::{QuestionId, SessionId, StateMachine, Timestamp, UserId};

/// What the quiz serves next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterestStep<'a> {
    Item {
        item: &'a InterestItem,
        /// One-based position in this session's order.
        index: usize,
        total: usize,
    },
    Complete,
}

/// Clamps a Likert answer into `LIKERT_MIN..=LIKERT_MAX`.
pub fn clamp_likert(value: i64) -> u8 {
    value.clamp(i64::from(LIKERT_MIN), i64::from(LIKERT_MAX)) as u8
}

/// One user's pass through the interest items, in a per-session shuffled
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestQuizSession {
    id: SessionId,
    user_id: UserId,
    status: InterestQuizStatus,
    order: Vec<QuestionId>,
    index: usize,
    answers: BTreeMap<QuestionId, u8>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl InterestQuizSession {
    pub fn new<R: Rng + ?Sized>(
        id: SessionId,
        user_id: UserId,
        bank: &InterestItemBank,
        rng: &mut R,
    ) -> Self {
        let mut order: Vec<QuestionId> = bank.items().iter().map(|i| i.id.clone()).collect();
        order.shuffle(rng);
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            status: InterestQuizStatus::InProgress,
            order,
            index: 0,
            answers: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> InterestQuizStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == InterestQuizStatus::Complete
    }

    pub fn order(&self) -> &[QuestionId] {
        &self.order
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, u8> {
        &self.answers
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The item at the current position, or `Complete` past the end.
    ///
    /// Ids missing from `bank` are skipped over.
    pub fn next_item<'a>(&self, bank: &'a InterestItemBank) -> InterestStep<'a> {
        self.order
            .iter()
            .enumerate()
            .skip(self.index)
            .find_map(|(pos, qid)| {
                bank.get(qid).map(|item| InterestStep::Item {
                    item,
                    index: pos + 1,
                    total: self.order.len(),
                })
            })
            .unwrap_or(InterestStep::Complete)
    }

    /// Records a clamped answer and advances the position.
    ///
    /// Answers to ids the bank does not know are dropped, but the position
    /// still advances.
    pub fn capture(
        &mut self,
        bank: &InterestItemBank,
        question_id: QuestionId,
        value: i64,
    ) -> Result<(), InterestQuizError> {
        if self.is_complete() {
            return Err(InterestQuizError::invalid_state("interest quiz is already complete"));
        }
        if bank.get(&question_id).is_some() {
            self.answers.insert(question_id, clamp_likert(value));
        }
        self.index += 1;
        if self.index >= self.order.len() {
            self.status = self.status.transition_to(InterestQuizStatus::Complete)?;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn scores(&self, bank: &InterestItemBank) -> InterestScores {
        score_answers(bank, &self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interest::RiasecCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(n: usize) -> InterestItemBank {
        let items = (1..=n)
            .map(|i| InterestItem {
                id: QuestionId::new(i.to_string()).unwrap(),
                text: format!("Item {i}"),
                code: RiasecCode::ALL[(i - 1) % 6],
            })
            .collect();
        InterestItemBank::new(items).unwrap()
    }

    fn quiz(bank: &InterestItemBank, seed: u64) -> InterestQuizSession {
        let mut rng = StdRng::seed_from_u64(seed);
        InterestQuizSession::new(SessionId::new(), UserId::new("u1").unwrap(), bank, &mut rng)
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn order_is_a_permutation_of_the_bank() {
        let bank = bank(12);
        let q = quiz(&bank, 7);
        let mut ids: Vec<String> = q.order().iter().map(|i| i.as_str().to_string()).collect();
        ids.sort_by_key(|s| s.parse::<u32>().unwrap());
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let bank = bank(12);
        assert_eq!(quiz(&bank, 3).order(), quiz(&bank, 3).order());
    }

    #[test]
    fn walks_every_item_then_completes() {
        let bank = bank(6);
        let mut q = quiz(&bank, 1);
        let mut positions = Vec::new();
        while let InterestStep::Item { item, index, total } = q.next_item(&bank) {
            assert_eq!(total, 6);
            positions.push(index);
            let id = item.id.clone();
            q.capture(&bank, id, 4).unwrap();
        }
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
        assert!(q.is_complete());
        assert_eq!(q.answered(), 6);
    }

    #[test]
    fn values_are_clamped() {
        let bank = bank(6);
        let mut q = quiz(&bank, 2);
        q.capture(&bank, qid("1"), 9).unwrap();
        q.capture(&bank, qid("2"), -3).unwrap();
        assert_eq!(q.answers()[&qid("1")], 5);
        assert_eq!(q.answers()[&qid("2")], 1);
    }

    #[test]
    fn unknown_ids_advance_without_storing() {
        let bank = bank(6);
        let mut q = quiz(&bank, 2);
        q.capture(&bank, qid("nope"), 3).unwrap();
        assert_eq!(q.answered(), 0);
        let InterestStep::Item { index, .. } = q.next_item(&bank) else {
            panic!("expected an item");
        };
        assert_eq!(index, 2);
    }

    #[test]
    fn capture_after_completion_is_invalid_state() {
        let bank = bank(1);
        let mut q = quiz(&bank, 0);
        q.capture(&bank, qid("1"), 3).unwrap();
        assert!(matches!(
            q.capture(&bank, qid("1"), 3),
            Err(InterestQuizError::InvalidState(_))
        ));
        assert_eq!(q.next_item(&bank), InterestStep::Complete);
    }

    #[test]
    fn scores_reflect_answers() {
        let bank = bank(6);
        let mut q = quiz(&bank, 5);
        q.capture(&bank, qid("3"), 5).unwrap();
        let scores = q.scores(&bank);
        assert_eq!(scores.sums.get(RiasecCode::A), 5.0);
        assert_eq!(scores.code(), "ARI");
    }
}
