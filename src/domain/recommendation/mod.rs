//! Signal fusion recommender.
//!
//! Turns a trait label plus a raw six-dimension interest vector into a
//! ranked, deduplicated list of outcome categories:
//!
//! 1. normalize the raw vector and blend it with a label-derived hint
//! 2. look up the label's category prior
//! 3. score each category by dot-product similarity with the blend
//! 4. fuse prior and similarity, rank, dedup by normalized name
//! 5. attach presentation fields through a [`ClusterEnricher`]

mod enrichment;
mod errors;
mod ranking;
mod recommender;
mod tables;

pub use enrichment::{
    growth_skills, icon_for, natural_skills, short_description, spark_interest, why_it_fits,
    CategoryDescriptions, ClusterDetails, ClusterEnricher, StaticClusterEnricher,
};
pub use errors::RecommendationError;
pub use ranking::{compare_scores, normalize_name, rank_and_dedup, CategoryScore};
pub use recommender::{
    label_hint, FusionOutcome, FusionWeights, InterestProfile, Recommendation,
    SignalFusionRecommender,
};
pub use tables::{check_integrity, ClusterPriorTable, SimilarityMatrix};
