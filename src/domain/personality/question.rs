//! Yes/No questions, recorded responses and the question bank.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{TraitAxis, TraitLetter};
use crate::domain::foundation::{QuestionId, ValidationError};

/// Answers that select the letter printed on the "Yes" option.
const AFFIRMATIVE_ANSWERS: [&str; 4] = ["yes", "y", "true", "1"];

/// Immutable question record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    yes: TraitLetter,
    no: TraitLetter,
    axis: TraitAxis,
}

impl Question {
    /// Creates a question whose Yes and No letters must be the two poles of one axis.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        yes: TraitLetter,
        no: TraitLetter,
    ) -> Result<Self, ValidationError> {
        if yes.axis() != no.axis() || yes == no {
            return Err(ValidationError::invalid_format(
                "question",
                format!("'{}'/'{}' are not opposite poles of one axis", yes, no),
            ));
        }
        Ok(Self {
            id,
            text: text.into(),
            yes,
            no,
            axis: yes.axis(),
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn yes_letter(&self) -> TraitLetter {
        self.yes
    }

    pub fn no_letter(&self) -> TraitLetter {
        self.no
    }

    pub fn axis(&self) -> TraitAxis {
        self.axis
    }

    /// Maps a raw answer onto the pole it selects.
    pub fn letter_for(&self, answer: &str) -> TraitLetter {
        if is_affirmative(answer) {
            self.yes
        } else {
            self.no
        }
    }
}

/// True for "yes", "y", "true" and "1" in any case.
pub fn is_affirmative(answer: &str) -> bool {
    let normalized = answer.trim().to_lowercase();
    AFFIRMATIVE_ANSWERS.contains(&normalized.as_str())
}

/// One captured answer, stored with its normalized (trimmed, lowercased) text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub answer: String,
}

impl Response {
    pub fn new(question_id: QuestionId, answer: &str) -> Self {
        Self {
            question_id,
            answer: answer.trim().to_lowercase(),
        }
    }
}

/// Question bank with reverse lookup by identifier.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Builds a bank, rejecting empty input and duplicate identifiers.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        let mut by_id = HashMap::with_capacity(questions.len());
        for (i, q) in questions.iter().enumerate() {
            if by_id.insert(q.id().clone(), i).is_some() {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question id '{}'", q.id()),
                ));
            }
        }
        Ok(Self { questions, by_id })
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions registered on an axis.
    pub fn count_for(&self, axis: TraitAxis) -> usize {
        self.questions.iter().filter(|q| q.axis() == axis).count()
    }

    /// Picks uniformly among questions of `axis` not yet in `asked`.
    pub fn draw_unused<R: Rng + ?Sized>(
        &self,
        axis: TraitAxis,
        asked: &BTreeSet<QuestionId>,
        rng: &mut R,
    ) -> Option<&Question> {
        let pool: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.axis() == axis && !asked.contains(q.id()))
            .collect();
        pool.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn q(id: &str, yes: TraitLetter, no: TraitLetter) -> Question {
        Question::new(QuestionId::new(id).unwrap(), format!("Question {}", id), yes, no).unwrap()
    }

    #[test]
    fn question_infers_axis_from_letters() {
        let question = q("1", TraitLetter::E, TraitLetter::I);
        assert_eq!(question.axis(), TraitAxis::Ie);
    }

    #[test]
    fn question_rejects_letters_from_different_axes() {
        let result = Question::new(
            QuestionId::new("1").unwrap(),
            "Mixed",
            TraitLetter::I,
            TraitLetter::N,
        );
        assert!(result.is_err());
    }

    #[test]
    fn question_rejects_same_letter_twice() {
        let result = Question::new(
            QuestionId::new("1").unwrap(),
            "Same",
            TraitLetter::T,
            TraitLetter::T,
        );
        assert!(result.is_err());
    }

    #[test]
    fn affirmative_answers_are_normalized() {
        for answer in ["Yes", " y ", "TRUE", "1"] {
            assert!(is_affirmative(answer), "{answer}");
        }
        for answer in ["no", "", "maybe", "0"] {
            assert!(!is_affirmative(answer), "{answer}");
        }
    }

    #[test]
    fn letter_for_maps_answer_to_pole() {
        let question = q("1", TraitLetter::F, TraitLetter::T);
        assert_eq!(question.letter_for("yes"), TraitLetter::F);
        assert_eq!(question.letter_for("nope"), TraitLetter::T);
    }

    #[test]
    fn bank_rejects_empty_and_duplicates() {
        assert!(QuestionBank::new(vec![]).is_err());
        let dup = vec![
            q("1", TraitLetter::I, TraitLetter::E),
            q("1", TraitLetter::S, TraitLetter::N),
        ];
        assert!(QuestionBank::new(dup).is_err());
    }

    #[test]
    fn draw_unused_skips_asked_and_exhausts() {
        let bank = QuestionBank::new(vec![
            q("1", TraitLetter::I, TraitLetter::E),
            q("2", TraitLetter::E, TraitLetter::I),
            q("3", TraitLetter::S, TraitLetter::N),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut asked = BTreeSet::new();

        let first = bank.draw_unused(TraitAxis::Ie, &asked, &mut rng).unwrap().id().clone();
        asked.insert(first.clone());
        let second = bank.draw_unused(TraitAxis::Ie, &asked, &mut rng).unwrap().id().clone();
        assert_ne!(first, second);
        asked.insert(second);

        assert!(bank.draw_unused(TraitAxis::Ie, &asked, &mut rng).is_none());
        assert!(bank.draw_unused(TraitAxis::Tf, &asked, &mut rng).is_none());
        assert_eq!(bank.count_for(TraitAxis::Ie), 2);
    }

    #[test]
    fn response_normalizes_answer_text() {
        let r = Response::new(QuestionId::new("4").unwrap(), "  YES ");
        assert_eq!(r.answer, "yes");
    }
}
