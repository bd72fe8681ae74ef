//! Interest quiz scoring: sums, percents, the 0..32 scale, the three-letter
//! code and a pattern-clarity confidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{InterestItemBank, RiasecCode, RiasecScores};
use crate::domain::foundation::{round2, QuestionId};

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;

const LIKERT_MID: f64 = (LIKERT_MIN as f64 + LIKERT_MAX as f64) / 2.0;
const LIKERT_SPAN: f64 = (LIKERT_MAX - LIKERT_MIN) as f64;
const MAX_VARIANCE: f64 = 2500.0;

/// Per-code aggregates of a set of Likert answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestScores {
    /// Raw answer totals; this is the vector the recommender consumes.
    pub sums: RiasecScores,
    pub percents: RiasecScores,
    /// Means on the classic 0..32 scale.
    pub normalized: RiasecScores,
}

impl InterestScores {
    pub fn code(&self) -> String {
        top3_code(&self.sums)
    }

    pub fn confidence(&self) -> f64 {
        pattern_confidence(&self.percents)
    }
}

/// Scores `answers` against the item bank. Unknown ids are skipped.
///
/// A code with no answers sits at the Likert midpoint; with no answers at
/// all every sum is zero.
pub fn score_answers(bank: &InterestItemBank, answers: &BTreeMap<QuestionId, u8>) -> InterestScores {
    let mut sums = RiasecScores::default();
    let mut counts = [0u32; 6];
    for (qid, value) in answers {
        if let Some(code) = bank.code_of(qid) {
            sums.add(code, f64::from(*value));
            counts[code.index()] += 1;
        }
    }

    let mut percents = RiasecScores::default();
    let mut normalized = RiasecScores::default();
    for code in RiasecCode::ALL {
        let n = counts[code.index()];
        let mean = if n > 0 { sums.get(code) / f64::from(n) } else { LIKERT_MID };
        let position = (mean - f64::from(LIKERT_MIN)) / LIKERT_SPAN;
        percents.set(code, round2(100.0 * position));
        normalized.set(code, round2(32.0 * position));
    }

    InterestScores {
        sums,
        percents,
        normalized,
    }
}

/// The three codes with the highest sums, ties broken R,I,A,S,E,C.
pub fn top3_code(sums: &RiasecScores) -> String {
    sums.top_three()
}

/// Clarity of the interest pattern in `[0, 100]`.
///
/// Blends variance (40%), range (30%) and dominance of the top score over
/// the mean (30%). A flat profile scores zero.
pub fn pattern_confidence(percents: &RiasecScores) -> f64 {
    let values = percents.to_array();
    let first = values[0];
    if values.iter().all(|v| approx_eq(*v, first)) {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);

    let variance_part = (variance / MAX_VARIANCE * 100.0).min(100.0);
    let range_part = max - min;
    let dominance = if mean > 0.0 {
        ((max - mean) / mean * 100.0).max(0.0)
    } else {
        0.0
    };
    let dominance_part = dominance.min(100.0);

    let confidence = 0.4 * variance_part + 0.3 * range_part + 0.3 * dominance_part;
    round2(confidence.clamp(0.0, 100.0))
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}
