//! Six-dimension (RIASEC) interest quiz.
//!
//! Produces the raw per-dimension score vector consumed by the
//! recommendation module, and a confidence that blends pattern clarity with
//! per-scale reliability.

mod aggregate;
mod errors;
mod item;
mod reliability;
mod riasec;
mod scoring;
mod status;

pub use aggregate::{clamp_likert, InterestQuizSession, InterestStep};
pub use errors::InterestQuizError;
pub use item::{InterestItem, InterestItemBank};
pub use reliability::{
    combined_confidence, cronbach_alpha, ConfidenceLevel, HollandAnalysis, IntervalOverlap,
    ReliabilityReport, ResponseHistory, TraitReliability,
};
pub use riasec::{RiasecCode, RiasecScores};
pub use scoring::{
    pattern_confidence, score_answers, top3_code, InterestScores, LIKERT_MAX, LIKERT_MIN,
};
pub use status::InterestQuizStatus;
