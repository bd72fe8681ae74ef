//! Signal fusion recommender configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    /// Weight of the label prior against interest similarity
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Weight of the raw interest vector against the label hint
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Results returned when a request does not specify `top_k`
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidWeight { field, value });
            }
        }
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            top_k: default_top_k(),
        }
    }
}

fn default_alpha() -> f64 {
    0.3
}

fn default_beta() -> f64 {
    0.7
}

fn default_top_k() -> usize {
    3
}
