//! Signal fusion: blends a label-derived prior with a similarity score built
//! from the interest profile, then ranks the categories.

use serde::Serialize;
use std::sync::Arc;

use super::enrichment::ClusterEnricher;
use super::ranking::{rank_and_dedup, CategoryScore};
use super::tables::{normalize, ClusterPriorTable, SimilarityMatrix};
use super::RecommendationError;
use crate::domain::foundation::ValidationError;
use crate::domain::interest::{RiasecCode, RiasecScores};

/// Fusion weights. `alpha` weighs the label prior against similarity;
/// `beta` weighs the raw interest vector against the label hint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FusionWeights {
    pub alpha: f64,
    pub beta: f64,
}

impl FusionWeights {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("alpha", alpha), ("beta", beta)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
            }
        }
        Ok(Self { alpha, beta })
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.7,
        }
    }
}

/// Six-dimension hint derived from the letters of a trait label, normalized
/// to sum 1 (uniform when no letter contributes).
///
/// Each axis contributes once, the first pole letter found winning.
pub fn label_hint(label: &str) -> RiasecScores {
    use RiasecCode::*;

    let mut hint = RiasecScores::default();
    let mut bump = |codes: &[RiasecCode]| {
        for code in codes {
            hint.add(*code, 1.0);
        }
    };

    if label.contains('E') {
        bump(&[S, E]);
    } else if label.contains('I') {
        bump(&[I, C]);
    }
    if label.contains('S') {
        bump(&[R, C]);
    } else if label.contains('N') {
        bump(&[I, A]);
    }
    if label.contains('T') {
        bump(&[R, I, C]);
    } else if label.contains('F') {
        bump(&[A, S]);
    }
    if label.contains('J') {
        bump(&[I, C]);
    } else if label.contains('P') {
        bump(&[A, S, E]);
    }

    if hint.total() == 0.0 {
        RiasecScores::uniform(1.0 / 6.0)
    } else {
        hint.normalized()
    }
}

/// The three six-dimension vectors behind one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestProfile {
    /// Raw scores normalized to sum 1.
    pub raw: RiasecScores,
    pub label_hint: RiasecScores,
    /// `beta·raw + (1-beta)·label_hint`, renormalized.
    pub blended: RiasecScores,
}

impl InterestProfile {
    pub fn build(label: &str, raw_scores: &RiasecScores, beta: f64) -> Self {
        let raw = raw_scores.normalized();
        let hint = label_hint(label);
        let (r, h) = (raw.to_array(), hint.to_array());
        let blended: [f64; 6] = std::array::from_fn(|i| beta * r[i] + (1.0 - beta) * h[i]);
        Self {
            raw,
            label_hint: hint,
            blended: RiasecScores::from_array(blended).normalized(),
        }
    }
}

/// Every category's fused score, before ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionOutcome {
    pub label: String,
    pub profile: InterestProfile,
    pub scores: Vec<CategoryScore>,
}

/// One ranked category with its presentation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub cluster: String,
    pub probability: f64,
    pub explanation: String,
    pub icon: String,
    pub short_description: String,
    pub why_it_fits: String,
    pub natural_skills: Vec<String>,
    pub growth_skills: Vec<String>,
    pub spark_interest: String,
}

/// Ranks outcome categories for a trait label and a raw interest vector.
pub struct SignalFusionRecommender {
    prior: ClusterPriorTable,
    matrix: SimilarityMatrix,
    enricher: Arc<dyn ClusterEnricher>,
    weights: FusionWeights,
}

impl SignalFusionRecommender {
    pub fn new(
        prior: ClusterPriorTable,
        matrix: SimilarityMatrix,
        enricher: Arc<dyn ClusterEnricher>,
        weights: FusionWeights,
    ) -> Self {
        Self {
            prior,
            matrix,
            enricher,
            weights,
        }
    }

    pub fn weights(&self) -> FusionWeights {
        self.weights
    }

    pub fn prior_table(&self) -> &ClusterPriorTable {
        &self.prior
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Fused scores for every category of the prior table, summing to 1.
    pub fn score_all(
        &self,
        label: &str,
        raw_scores: &RiasecScores,
    ) -> Result<FusionOutcome, RecommendationError> {
        let label = normalize_label(label)?;
        raw_scores.validate("raw_scores")?;

        let profile = InterestProfile::build(&label, raw_scores, self.weights.beta);
        let prior = self.prior.distribution(&label);
        let similarity = self.matrix.similarity(&profile.blended);

        let alpha = self.weights.alpha;
        let fused: Vec<f64> = self
            .prior
            .categories()
            .iter()
            .zip(&prior)
            .map(|(name, p)| alpha * p + (1.0 - alpha) * similarity.get(name).copied().unwrap_or(0.0))
            .collect();

        let scores = self
            .prior
            .categories()
            .iter()
            .zip(prior)
            .zip(normalize(fused))
            .map(|((name, p), final_score)| CategoryScore {
                name: name.clone(),
                final_score,
                similarity: similarity.get(name).copied().unwrap_or(0.0),
                prior: p,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            label = %label,
            categories = scores.len(),
            top_components = %profile.blended.top_three(),
            "fused category scores"
        );

        Ok(FusionOutcome {
            label,
            profile,
            scores,
        })
    }

    /// The top `top_k` distinct categories, best first.
    pub fn recommend(
        &self,
        label: &str,
        raw_scores: &RiasecScores,
        top_k: usize,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        if top_k == 0 {
            return Err(ValidationError::out_of_range("top_k", 1.0, f64::from(u32::MAX), 0.0).into());
        }
        let outcome = self.score_all(label, raw_scores)?;
        let blended = outcome.profile.blended;

        let recommendations = rank_and_dedup(outcome.scores, top_k)
            .into_iter()
            .map(|score| {
                let details = self.enricher.enrich(&score.name, &outcome.label, &blended);
                Recommendation {
                    cluster: score.name,
                    probability: score.final_score,
                    explanation: details.description,
                    icon: details.icon,
                    short_description: details.short_description,
                    why_it_fits: details.why_it_fits,
                    natural_skills: details.natural_skills,
                    growth_skills: details.growth_skills,
                    spark_interest: details.spark_interest,
                }
            })
            .collect();
        Ok(recommendations)
    }
}

fn normalize_label(label: &str) -> Result<String, RecommendationError> {
    let label = label.trim().to_uppercase();
    if label.is_empty() {
        return Err(ValidationError::empty_field("label").into());
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::enrichment::{CategoryDescriptions, StaticClusterEnricher};
    use crate::domain::recommendation::ranking::normalize_name;
    use proptest::prelude::*;
    use std::collections::HashSet;

    const CATEGORIES: [&str; 5] = [
        "Education & Training",
        "Arts, A/V Technology & Communications",
        "Information Technology",
        "Manufacturing",
        "Health Science",
    ];

    fn recommender(alpha: f64, beta: f64) -> SignalFusionRecommender {
        let prior = ClusterPriorTable::new(
            CATEGORIES.iter().map(|s| s.to_string()).collect(),
            vec![
                ("ENFJ".into(), vec![5.0, 4.0, 1.0, 0.5, 2.0]),
                ("ISTJ".into(), vec![1.0, 0.5, 4.0, 5.0, 2.0]),
            ],
        )
        .unwrap();
        let matrix = SimilarityMatrix::new(vec![
            (CATEGORIES[0].into(), RiasecScores::from_array([0.0, 0.0, 0.5, 1.0, 0.5, 0.0])),
            (CATEGORIES[1].into(), RiasecScores::from_array([0.0, 0.0, 1.0, 0.3, 0.3, 0.0])),
            (CATEGORIES[2].into(), RiasecScores::from_array([0.3, 1.0, 0.0, 0.0, 0.0, 0.8])),
            (CATEGORIES[3].into(), RiasecScores::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 0.5])),
            (CATEGORIES[4].into(), RiasecScores::from_array([0.2, 0.6, 0.0, 0.6, 0.0, 0.0])),
        ])
        .unwrap();
        let mut descriptions = CategoryDescriptions::new();
        descriptions.insert(CATEGORIES[0], "Teach and train others. Shape how people learn. Many settings.");
        SignalFusionRecommender::new(
            prior,
            matrix,
            Arc::new(StaticClusterEnricher::new(descriptions)),
            FusionWeights::new(alpha, beta).unwrap(),
        )
    }

    fn example_raw() -> RiasecScores {
        RiasecScores::from_array([8.0, 14.0, 24.0, 20.0, 12.0, 6.0])
    }

    #[test]
    fn label_hint_follows_letter_mapping() {
        let hint = label_hint("ENFJ");
        let expected = [0.0, 2.0, 2.0, 2.0, 1.0, 1.0].map(|v| v / 8.0);
        for (got, want) in hint.to_array().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn label_hint_is_uniform_without_known_letters() {
        assert_eq!(label_hint("XYZ"), RiasecScores::uniform(1.0 / 6.0));
    }

    #[test]
    fn enfj_example_favours_people_and_creative_categories() {
        let recs = recommender(0.3, 0.7).recommend("enfj", &example_raw(), 3).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.cluster.as_str()).collect();
        assert_eq!(
            names,
            ["Education & Training", "Arts, A/V Technology & Communications", "Health Science"]
        );
        for (rec, want) in recs.iter().zip([0.32874, 0.27717, 0.17538]) {
            assert!((rec.probability - want).abs() < 1e-4, "{} = {}", rec.cluster, rec.probability);
        }
        assert!(!names.contains(&"Manufacturing"));
        assert!(!names.contains(&"Information Technology"));
        assert_eq!(recs[0].short_description, "Teach and train others. Shape how people learn.");
        assert_eq!(recs[0].why_it_fits, "Aligned with: ENFJ • High A / S interest");
        assert!(recs[0].probability > recs[1].probability);
    }

    #[test]
    fn istj_prior_pulls_towards_technical_categories() {
        let raw = RiasecScores::from_array([20.0, 18.0, 4.0, 6.0, 8.0, 16.0]);
        let recs = recommender(0.3, 0.7).recommend("ISTJ", &raw, 2).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.cluster.as_str()).collect();
        assert!(names.contains(&"Information Technology"));
        assert!(names.contains(&"Manufacturing"));
    }

    #[test]
    fn unknown_label_still_recommends() {
        let recs = recommender(0.3, 0.7).recommend("ZZZZ", &example_raw(), 3).unwrap();
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn zero_raw_scores_fall_back_to_label_hint() {
        let outcome = recommender(0.3, 0.7)
            .score_all("ENFJ", &RiasecScores::default())
            .unwrap();
        for (got, want) in outcome
            .profile
            .blended
            .to_array()
            .iter()
            .zip(label_hint("ENFJ").to_array())
        {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_bad_input() {
        let r = recommender(0.3, 0.7);
        assert!(r.recommend("  ", &example_raw(), 3).is_err());
        assert!(r.recommend("ENFJ", &example_raw(), 0).is_err());
        let negative = RiasecScores::from_array([-1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            r.recommend("ENFJ", &negative, 3),
            Err(RecommendationError::Validation { .. })
        ));
    }

    #[test]
    fn weights_must_be_in_unit_interval() {
        assert!(FusionWeights::new(1.2, 0.5).is_err());
        assert!(FusionWeights::new(0.5, -0.1).is_err());
        assert_eq!(FusionWeights::default(), FusionWeights::new(0.3, 0.7).unwrap());
    }

    #[test]
    fn duplicate_spellings_collapse() {
        let prior = ClusterPriorTable::new(
            vec!["Information Technology".into(), "Information-Technology".into(), "Law".into()],
            vec![("INTJ".into(), vec![3.0, 2.0, 1.0])],
        )
        .unwrap();
        let matrix = SimilarityMatrix::new(vec![
            ("Information Technology".into(), RiasecScores::uniform(1.0)),
            ("Information-Technology".into(), RiasecScores::uniform(1.0)),
            ("Law".into(), RiasecScores::uniform(1.0)),
        ])
        .unwrap();
        let r = SignalFusionRecommender::new(
            prior,
            matrix,
            Arc::new(StaticClusterEnricher::default()),
            FusionWeights::default(),
        );
        let recs = r.recommend("INTJ", &RiasecScores::uniform(1.0), 3).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.cluster.as_str()).collect();
        assert_eq!(names, vec!["Information Technology", "Law"]);
    }

    proptest! {
        #[test]
        fn full_scores_sum_to_one(
            raw in prop::array::uniform6(0.0f64..50.0),
            alpha in 0.0f64..=1.0,
            beta in 0.0f64..=1.0,
            label in prop::sample::select(vec!["ENFJ", "ISTJ", "INTP", "ESFP", "QQQQ"]),
        ) {
            let outcome = recommender(alpha, beta)
                .score_all(label, &RiasecScores::from_array(raw))
                .unwrap();
            let total: f64 = outcome.scores.iter().map(|s| s.final_score).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            prop_assert_eq!(outcome.scores.len(), CATEGORIES.len());
        }

        #[test]
        fn recommendations_are_bounded_and_distinct(
            raw in prop::array::uniform6(0.0f64..50.0),
            top_k in 1usize..8,
        ) {
            let recs = recommender(0.3, 0.7)
                .recommend("ENFJ", &RiasecScores::from_array(raw), top_k)
                .unwrap();
            prop_assert!(recs.len() <= top_k);
            let unique: HashSet<String> = recs.iter().map(|r| normalize_name(&r.cluster)).collect();
            prop_assert_eq!(unique.len(), recs.len());
        }
    }
}
