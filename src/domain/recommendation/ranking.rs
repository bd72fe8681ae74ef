//! Deterministic ordering and name-level deduplication of category scores.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Scores for one category after fusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub final_score: f64,
    pub similarity: f64,
    pub prior: f64,
}

/// Lower-cased name with every non-alphanumeric character removed, so
/// "Information-Technology" and "information technology" compare equal.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Descending by final score, then similarity, then prior; ascending by
/// normalized name last.
pub fn compare_scores(a: &CategoryScore, b: &CategoryScore) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| b.similarity.total_cmp(&a.similarity))
        .then_with(|| b.prior.total_cmp(&a.prior))
        .then_with(|| normalize_name(&a.name).cmp(&normalize_name(&b.name)))
}

/// Sorts, then keeps the first occurrence of each normalized name until
/// `top_k` entries are collected.
pub fn rank_and_dedup(mut scores: Vec<CategoryScore>, top_k: usize) -> Vec<CategoryScore> {
    scores.sort_by(compare_scores);
    let mut seen = HashSet::new();
    scores
        .into_iter()
        .filter(|s| seen.insert(normalize_name(&s.name)))
        .take(top_k)
        .collect()
}
