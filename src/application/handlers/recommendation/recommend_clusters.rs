//! RecommendClustersHandler - Ranks outcome categories for a label and an
//! interest vector.

use std::sync::Arc;

use crate::application::handlers::result_logging::append_best_effort;
use crate::domain::foundation::Timestamp;
use crate::domain::interest::RiasecScores;
use crate::domain::recommendation::{Recommendation, RecommendationError, SignalFusionRecommender};
use crate::ports::{LogRecord, ResultLog};

#[derive(Debug, Clone)]
pub struct RecommendClustersCommand {
    pub label: String,
    pub raw_scores: RiasecScores,
    /// Falls back to the handler default.
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct RecommendClustersResult {
    pub label: String,
    pub recommendations: Vec<Recommendation>,
}

pub struct RecommendClustersHandler {
    recommender: Arc<SignalFusionRecommender>,
    log: Arc<dyn ResultLog>,
    default_top_k: usize,
}

impl RecommendClustersHandler {
    pub fn new(recommender: Arc<SignalFusionRecommender>, log: Arc<dyn ResultLog>, default_top_k: usize) -> Self {
        Self {
            recommender,
            log,
            default_top_k,
        }
    }

    pub async fn handle(&self, cmd: RecommendClustersCommand) -> Result<RecommendClustersResult, RecommendationError> {
        let top_k = cmd.top_k.unwrap_or(self.default_top_k);
        let recommendations = self.recommender.recommend(&cmd.label, &cmd.raw_scores, top_k)?;
        let label = cmd.label.trim().to_uppercase();

        append_best_effort(
            self.log.as_ref(),
            LogRecord::Recommendation {
                label: label.clone(),
                clusters: recommendations.iter().map(|r| r.cluster.clone()).collect(),
                timestamp: Timestamp::now(),
            },
        )
        .await;

        tracing::info!(label = %label, top_k, returned = recommendations.len(), "clusters recommended");
        Ok(RecommendClustersResult {
            label,
            recommendations,
        })
    }
}
