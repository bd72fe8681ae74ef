//! Adaptive assessment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning for the adaptive session controller
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Questions asked per trait axis before the session completes
    #[serde(default = "default_target_per_axis")]
    pub target_per_axis: u32,

    /// Probability of a uniform axis pick instead of the bandit's best
    #[serde(default = "default_exploration_rate")]
    pub exploration_rate: f64,

    /// Dropout passes after each captured answer
    #[serde(default = "default_capture_samples")]
    pub capture_samples: usize,

    /// Dropout passes for the final result
    #[serde(default = "default_result_samples")]
    pub result_samples: usize,

    /// Fixed seed for reproducible runs; entropy-seeded when unset
    pub rng_seed: Option<u64>,
}

impl AssessmentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_per_axis == 0 {
            return Err(ValidationError::InvalidTargetPerAxis);
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(ValidationError::InvalidWeight {
                field: "exploration_rate",
                value: self.exploration_rate,
            });
        }
        if self.capture_samples == 0 {
            return Err(ValidationError::InvalidSampleCount("capture_samples"));
        }
        if self.result_samples == 0 {
            return Err(ValidationError::InvalidSampleCount("result_samples"));
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            target_per_axis: default_target_per_axis(),
            exploration_rate: default_exploration_rate(),
            capture_samples: default_capture_samples(),
            result_samples: default_result_samples(),
            rng_seed: None,
        }
    }
}

fn default_target_per_axis() -> u32 {
    9
}

fn default_exploration_rate() -> f64 {
    0.1
}

fn default_capture_samples() -> usize {
    40
}

fn default_result_samples() -> usize {
    80
}
