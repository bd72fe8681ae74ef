//! Request and response bodies for the recommendation endpoint.

use serde::{Deserialize, Serialize};

use crate::application::{RecommendClustersCommand, RecommendClustersResult};
use crate::domain::interest::RiasecScores;
use crate::domain::recommendation::Recommendation;

/// Body of `POST /api/v1/clusters/recommend`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub label: String,
    /// `{"R": .., "I": .., ..}`; missing components count as zero.
    #[serde(default)]
    pub raw_scores: RiasecScores,
    pub top_k: Option<usize>,
}

impl From<RecommendRequest> for RecommendClustersCommand {
    fn from(req: RecommendRequest) -> Self {
        Self {
            label: req.label,
            raw_scores: req.raw_scores,
            top_k: req.top_k,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub label: String,
    pub recommendations: Vec<Recommendation>,
}

impl From<RecommendClustersResult> for RecommendResponse {
    fn from(result: RecommendClustersResult) -> Self {
        Self {
            label: result.label,
            recommendations: result.recommendations,
        }
    }
}
