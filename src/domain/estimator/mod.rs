//! Trait estimation: feature building, the dropout network and the
//! uncertainty and confidence scores read off repeated noisy passes.

mod mc_dropout;
mod features;
mod network;
mod uncertainty;

pub use mc_dropout::{TraitEstimate, TraitEstimator};
pub use features::{build_features, FeatureVector, NEUTRAL_RATIO, TIE_RATIO};
pub use network::{NetworkWeights, TraitNetwork, DROPOUT_RATE, TRAIT_DIMS};
pub use uncertainty::{base_confidence, confidence_score, spread_penalty, uncertainty_score};

#[cfg(test)]
pub(crate) use network::tests::identity_like_weights;
