//! Monte Carlo dropout trait estimator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::network::{TraitNetwork, TRAIT_DIMS};
use super::FeatureVector;
use crate::domain::foundation::ValidationError;
use crate::domain::personality::TraitLabel;

/// Mean, spread and label from repeated noisy passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitEstimate {
    pub label: TraitLabel,
    pub mean: [f64; TRAIT_DIMS],
    pub std_dev: [f64; TRAIT_DIMS],
}

impl TraitEstimate {
    pub fn mean_std_dev(&self) -> f64 {
        self.std_dev.iter().sum::<f64>() / TRAIT_DIMS as f64
    }
}

/// Wraps the network and runs the sampling loop.
#[derive(Debug, Clone)]
pub struct TraitEstimator {
    network: TraitNetwork,
}

impl TraitEstimator {
    pub fn new(network: TraitNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &TraitNetwork {
        &self.network
    }

    /// Runs `sample_count` (at least one) noisy passes over the clipped input.
    ///
    /// Fails when the input is not four finite numbers.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        features: &[f64],
        sample_count: usize,
        rng: &mut R,
    ) -> Result<TraitEstimate, ValidationError> {
        if features.len() != TRAIT_DIMS {
            return Err(ValidationError::wrong_length(
                "features",
                TRAIT_DIMS,
                features.len(),
            ));
        }
        let mut x = [0.0; TRAIT_DIMS];
        for (slot, v) in x.iter_mut().zip(features) {
            if !v.is_finite() {
                return Err(ValidationError::invalid_format(
                    "features",
                    "values must be finite numbers",
                ));
            }
            *slot = v.clamp(0.0, 1.0);
        }

        let n = sample_count.max(1);
        let mut sum = [0.0; TRAIT_DIMS];
        let mut sum_sq = [0.0; TRAIT_DIMS];
        for _ in 0..n {
            let y = self.network.forward(&x, true, rng);
            for i in 0..TRAIT_DIMS {
                sum[i] += y[i];
                sum_sq[i] += y[i] * y[i];
            }
        }

        let count = n as f64;
        let mut mean = [0.0; TRAIT_DIMS];
        let mut std_dev = [0.0; TRAIT_DIMS];
        for i in 0..TRAIT_DIMS {
            mean[i] = sum[i] / count;
            // population variance; clamp away rounding below zero
            std_dev[i] = (sum_sq[i] / count - mean[i] * mean[i]).max(0.0).sqrt();
        }

        Ok(TraitEstimate {
            label: TraitLabel::from_probabilities(&mean),
            mean,
            std_dev,
        })
    }

    /// Convenience wrapper over [`predict`](Self::predict) for a built vector.
    pub fn predict_features<R: Rng + ?Sized>(
        &self,
        features: &FeatureVector,
        sample_count: usize,
        rng: &mut R,
    ) -> Result<TraitEstimate, ValidationError> {
        self.predict(features.values(), sample_count, rng)
    }
}
