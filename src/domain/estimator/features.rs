//! Feature builder: answered questions to a per-axis ratio vector.

use serde::{Deserialize, Serialize};

use crate::domain::personality::{QuestionBank, Response, TraitAxis};

/// Ratio used for an axis with no answers.
pub const NEUTRAL_RATIO: f64 = 0.5;

/// Ratio used when both poles of an axis have the same count.
pub const TIE_RATIO: f64 = 0.51;

/// Four ratios in `[0, 1]`, one per axis, in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; 4]);

impl FeatureVector {
    pub fn new(values: [f64; 4]) -> Self {
        Self(values)
    }

    /// All axes unanswered.
    pub fn neutral() -> Self {
        Self([NEUTRAL_RATIO; 4])
    }

    pub fn values(&self) -> &[f64; 4] {
        &self.0
    }

    pub fn get(&self, axis: TraitAxis) -> f64 {
        self.0[axis.index()]
    }

    /// Mean absolute distance of the ratios from 0.5.
    pub fn mean_distance(&self) -> f64 {
        self.0.iter().map(|v| (v - 0.5).abs()).sum::<f64>() / 4.0
    }
}

/// Positive and negative pole tallies for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    positive: u32,
    negative: u32,
}

impl Tally {
    fn ratio(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0 {
            NEUTRAL_RATIO
        } else if self.positive == self.negative {
            TIE_RATIO
        } else {
            f64::from(self.positive) / f64::from(total)
        }
    }
}

/// Builds the feature vector from responses.
///
/// Responses whose question id is not in the bank are skipped.
pub fn build_features(bank: &QuestionBank, responses: &[Response]) -> FeatureVector {
    let mut tallies = [Tally::default(); 4];
    for response in responses {
        let Some(question) = bank.get(&response.question_id) else {
            continue;
        };
        let letter = question.letter_for(&response.answer);
        let tally = &mut tallies[letter.axis().index()];
        if letter.is_positive() {
            tally.positive += 1;
        } else {
            tally.negative += 1;
        }
    }
    FeatureVector(tallies.map(|t| t.ratio()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::personality::{Question, TraitLetter};
    use proptest::prelude::*;

    fn bank() -> QuestionBank {
        let specs = [
            ("1", TraitLetter::I, TraitLetter::E),
            ("2", TraitLetter::I, TraitLetter::E),
            ("3", TraitLetter::E, TraitLetter::I),
            ("4", TraitLetter::S, TraitLetter::N),
            ("5", TraitLetter::T, TraitLetter::F),
            ("6", TraitLetter::P, TraitLetter::J),
            ("7", TraitLetter::J, TraitLetter::P),
            ("8", TraitLetter::S, TraitLetter::N),
        ];
        QuestionBank::new(
            specs
                .iter()
                .map(|(id, yes, no)| {
                    Question::new(QuestionId::new(*id).unwrap(), "q", *yes, *no).unwrap()
                })
                .collect(),
        )
        .unwrap()
    }

    fn resp(id: &str, answer: &str) -> Response {
        Response::new(QuestionId::new(id).unwrap(), answer)
    }

    #[test]
    fn no_answers_yields_neutral_vector() {
        assert_eq!(build_features(&bank(), &[]), FeatureVector::neutral());
    }

    #[test]
    fn opposite_answers_on_same_pairing_tie_at_point_five_one() {
        let features = build_features(&bank(), &[resp("1", "yes"), resp("2", "no")]);
        assert_eq!(features.get(TraitAxis::Ie), TIE_RATIO);
        assert_eq!(features.get(TraitAxis::Sn), NEUTRAL_RATIO);
    }

    #[test]
    fn reversed_question_counts_toward_negative_pole() {
        // "3" prints E on Yes, so a yes is an E vote.
        let features = build_features(&bank(), &[resp("1", "yes"), resp("3", "yes"), resp("2", "y")]);
        assert!((features.get(TraitAxis::Ie) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let features = build_features(&bank(), &[resp("999", "yes"), resp("5", "no")]);
        assert_eq!(features.get(TraitAxis::Tf), 0.0);
        assert_eq!(features.get(TraitAxis::Ie), NEUTRAL_RATIO);
    }

    #[test]
    fn builder_is_idempotent() {
        let responses = vec![resp("4", "1"), resp("8", "true"), resp("6", "no")];
        let b = bank();
        assert_eq!(build_features(&b, &responses), build_features(&b, &responses));
    }

    #[test]
    fn mean_distance_averages_axes() {
        let f = FeatureVector::new([1.0, 0.0, 0.5, 0.5]);
        assert!((f.mean_distance() - 0.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn coordinates_stay_in_unit_interval(
            answers in prop::collection::vec((1usize..=8, any::<bool>()), 0..40)
        ) {
            let responses: Vec<Response> = answers
                .iter()
                .map(|(id, yes)| resp(&id.to_string(), if *yes { "yes" } else { "no" }))
                .collect();
            let features = build_features(&bank(), &responses);
            for v in features.values() {
                prop_assert!((0.0..=1.0).contains(v));
            }
        }

        #[test]
        fn balanced_axis_never_reports_exact_half(n in 1u32..10) {
            let mut responses = Vec::new();
            for _ in 0..n {
                responses.push(resp("5", "yes"));
                responses.push(resp("5", "no"));
            }
            let features = build_features(&bank(), &responses);
            prop_assert_eq!(features.get(TraitAxis::Tf), TIE_RATIO);
        }
    }
}
