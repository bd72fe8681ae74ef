//! Trait-level reliability of a scored quiz.
//!
//! Internal consistency (Cronbach's α) and spread are estimated per scale
//! from the answer sets of earlier quizzes. From those come the standard
//! error of measurement, a 95% interval around each percent score, a
//! percentile rank and a per-trait confidence. Before any quiz has been
//! recorded, published norms stand in.

use ndarray::{Array2, Axis};
use serde::Serialize;
use std::collections::BTreeMap;

use super::scoring::{score_answers, InterestScores};
use super::{InterestItemBank, RiasecCode};
use crate::domain::foundation::{round2, QuestionId};

/// Published α per scale in R, I, A, S, E, C order.
const NORM_ALPHAS: [f64; 6] = [0.80, 0.82, 0.79, 0.81, 0.80, 0.78];
/// α for a scale whose history cannot support an estimate.
const FALLBACK_ALPHA: f64 = 0.75;
/// Spread of a scale sum when fewer than two quizzes are on record.
const NORM_SD: f64 = 7.0;
const Z_95: f64 = 1.96;
/// Width of the percent scale the intervals live on.
const SCORE_RANGE: f64 = 100.0;
const TRAIT_WEIGHT: f64 = 0.6;

/// Answer sets of earlier scored quizzes, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseHistory {
    responses: Vec<BTreeMap<QuestionId, u8>>,
}

impl ResponseHistory {
    pub fn new(responses: Vec<BTreeMap<QuestionId, u8>>) -> Self {
        Self { responses }
    }

    pub fn push(&mut self, answers: BTreeMap<QuestionId, u8>) {
        self.responses.push(answers);
    }

    pub fn responses(&self) -> &[BTreeMap<QuestionId, u8>] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Cronbach's α of a participants × items matrix, clamped to `[0, 1]`.
///
/// Zero with fewer than two participants or items, or when the totals do
/// not vary.
pub fn cronbach_alpha(items: &Array2<f64>) -> f64 {
    let (participants, n_items) = items.dim();
    if participants < 2 || n_items < 2 {
        return 0.0;
    }
    let item_variance = items.var_axis(Axis(0), 1.0).sum();
    let totals = items.sum_axis(Axis(1)).insert_axis(Axis(1));
    let total_variance = totals.var_axis(Axis(0), 1.0)[0];
    if total_variance <= f64::EPSILON {
        return 0.0;
    }
    let k = n_items as f64;
    (k / (k - 1.0) * (1.0 - item_variance / total_variance)).clamp(0.0, 1.0)
}

/// α per scale, in `RiasecCode::ALL` order.
///
/// An empty history yields the published norms. Otherwise a scale with
/// fewer than two items, fewer than two quizzes answering all of them, or
/// a non-positive estimate gets `FALLBACK_ALPHA`.
pub fn scale_alphas(bank: &InterestItemBank, history: &ResponseHistory) -> [f64; 6] {
    if history.is_empty() {
        return NORM_ALPHAS;
    }
    RiasecCode::ALL.map(|code| {
        let items: Vec<&QuestionId> = bank
            .items()
            .iter()
            .filter(|item| item.code == code)
            .map(|item| &item.id)
            .collect();
        if items.len() < 2 {
            return FALLBACK_ALPHA;
        }

        let complete: Vec<Vec<f64>> = history
            .responses()
            .iter()
            .filter_map(|answers| {
                items
                    .iter()
                    .map(|id| answers.get(*id).map(|v| f64::from(*v)))
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();
        if complete.len() < 2 {
            return FALLBACK_ALPHA;
        }

        let rows = complete.len();
        match Array2::from_shape_vec((rows, items.len()), complete.concat()) {
            Ok(matrix) => match cronbach_alpha(&matrix) {
                alpha if alpha > 0.0 => alpha,
                _ => FALLBACK_ALPHA,
            },
            Err(_) => FALLBACK_ALPHA,
        }
    })
}

/// Sample standard deviation of each scale sum across past quizzes.
pub fn scale_sds(past: &[InterestScores]) -> [f64; 6] {
    if past.len() < 2 {
        return [NORM_SD; 6];
    }
    let flat: Vec<f64> = past.iter().flat_map(|s| s.sums.to_array()).collect();
    match Array2::from_shape_vec((past.len(), 6), flat) {
        Ok(sums) => {
            let sd = sums.std_axis(Axis(0), 1.0);
            std::array::from_fn(|i| sd[i])
        }
        Err(_) => [NORM_SD; 6],
    }
}

/// `sd·√(1-α)`; zero for a non-positive `sd` or an α outside `[0, 1]`.
pub fn standard_error(sd: f64, alpha: f64) -> f64 {
    if sd <= 0.0 || !(0.0..=1.0).contains(&alpha) {
        return 0.0;
    }
    sd * (1.0 - alpha).sqrt()
}

/// Share of `population` below `score`, ties counting half, in `[0, 100]`.
/// An empty population puts every score at the median.
pub fn percentile_rank(score: f64, population: &[f64]) -> f64 {
    if population.is_empty() {
        return 50.0;
    }
    let below = population.iter().filter(|v| **v < score).count() as f64;
    let equal = population.iter().filter(|v| **v == score).count() as f64;
    (below + 0.5 * equal) / population.len() as f64 * 100.0
}

/// Reliability figures for one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitReliability {
    pub code: RiasecCode,
    /// Percent score the interval is centred on.
    pub score: f64,
    pub raw_sum: f64,
    pub alpha: f64,
    pub sd: f64,
    pub sem: f64,
    pub ci_95_lower: f64,
    pub ci_95_upper: f64,
    pub percentile: f64,
    /// `1 - sem/100` as a percentage.
    pub confidence: f64,
}

impl TraitReliability {
    fn overlaps(&self, other: &TraitReliability) -> bool {
        !(self.ci_95_upper < other.ci_95_lower || other.ci_95_upper < self.ci_95_lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Whether two of the top scales' intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalOverlap {
    pub first: RiasecCode,
    pub second: RiasecCode,
    pub overlaps: bool,
}

/// The three highest percent scores and how separable they are.
///
/// No overlapping pair is `High`, all three overlapping is `Low`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HollandAnalysis {
    pub code: String,
    pub top_three: Vec<RiasecCode>,
    pub overlaps: Vec<IntervalOverlap>,
    pub level: ConfidenceLevel,
}

impl HollandAnalysis {
    fn from_traits(traits: &[TraitReliability]) -> Self {
        let mut ranked: Vec<&TraitReliability> = traits.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(3);

        let mut overlaps = Vec::new();
        for (i, first) in ranked.iter().enumerate() {
            for second in &ranked[i + 1..] {
                overlaps.push(IntervalOverlap {
                    first: first.code,
                    second: second.code,
                    overlaps: first.overlaps(second),
                });
            }
        }
        let overlapping = overlaps.iter().filter(|o| o.overlaps).count();
        let level = match overlapping {
            0 => ConfidenceLevel::High,
            n if n == overlaps.len() => ConfidenceLevel::Low,
            _ => ConfidenceLevel::Medium,
        };

        Self {
            code: ranked.iter().map(|t| t.code.as_char()).collect(),
            top_three: ranked.iter().map(|t| t.code).collect(),
            overlaps,
            level,
        }
    }
}

/// Per-scale reliability of one scored quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliabilityReport {
    pub traits: Vec<TraitReliability>,
    pub holland: HollandAnalysis,
    /// Mean of the per-trait confidences, in `[0, 100]`.
    pub trait_confidence: f64,
}

impl ReliabilityReport {
    pub fn assess(bank: &InterestItemBank, scores: &InterestScores, history: &ResponseHistory) -> Self {
        let alphas = scale_alphas(bank, history);
        let past: Vec<InterestScores> = history
            .responses()
            .iter()
            .map(|answers| score_answers(bank, answers))
            .collect();
        let sds = scale_sds(&past);

        let traits: Vec<TraitReliability> = RiasecCode::ALL
            .iter()
            .map(|&code| {
                let i = code.index();
                let score = scores.percents.get(code);
                let sem = standard_error(sds[i], alphas[i]);
                let population: Vec<f64> = past.iter().map(|s| s.percents.get(code)).collect();
                TraitReliability {
                    code,
                    score,
                    raw_sum: scores.sums.get(code),
                    alpha: alphas[i],
                    sd: sds[i],
                    sem,
                    ci_95_lower: score - Z_95 * sem,
                    ci_95_upper: score + Z_95 * sem,
                    percentile: percentile_rank(score, &population),
                    confidence: 100.0 * (1.0 - sem / SCORE_RANGE).clamp(0.0, 1.0),
                }
            })
            .collect();

        let trait_confidence = traits.iter().map(|t| t.confidence).sum::<f64>() / traits.len() as f64;
        Self {
            holland: HollandAnalysis::from_traits(&traits),
            traits,
            trait_confidence,
        }
    }
}

/// `0.6·trait + 0.4·pattern`, rounded to two decimals. Without a report
/// the pattern confidence stands alone.
pub fn combined_confidence(pattern: f64, report: Option<&ReliabilityReport>) -> f64 {
    match report {
        Some(report) => round2(TRAIT_WEIGHT * report.trait_confidence + (1.0 - TRAIT_WEIGHT) * pattern),
        None => pattern,
    }
}
