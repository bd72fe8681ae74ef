//! Startup wiring: configuration plus a loaded catalog become the
//! application services behind the router.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::adapters::catalog::Catalog;
use crate::adapters::http::{AppState, HttpSettings};
use crate::adapters::logging::{CsvResultLog, NullResultLog};
use crate::adapters::storage::{FileSessionStore, InMemorySessionStore};
use crate::application::{
    AssessmentController, AssessmentSettings, InterestQuizHandler, RecommendClustersHandler,
};
use crate::config::{AppConfig, AssessmentConfig, StorageBackend, StorageConfig};
use crate::domain::assessment::AssessmentSession;
use crate::domain::bandit::BanditState;
use crate::domain::foundation::ValidationError;
use crate::domain::interest::InterestQuizSession;
use crate::domain::recommendation::{FusionWeights, SignalFusionRecommender, StaticClusterEnricher};
use crate::ports::{ResultLog, SessionStore};

impl From<&AssessmentConfig> for AssessmentSettings {
    fn from(config: &AssessmentConfig) -> Self {
        Self {
            target_per_axis: config.target_per_axis,
            exploration_rate: config.exploration_rate,
            capture_samples: config.capture_samples,
            result_samples: config.result_samples,
        }
    }
}

impl From<&AppConfig> for HttpSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            cors_origins: config.server.origins(),
            request_timeout: config.server.request_timeout(),
        }
    }
}

/// Builds every service from `config` and `catalog`.
pub fn build_state(config: &AppConfig, catalog: Catalog) -> Result<AppState, ValidationError> {
    let log: Arc<dyn ResultLog> = match &config.data.log_dir {
        Some(dir) => Arc::new(CsvResultLog::new(dir)),
        None => Arc::new(NullResultLog),
    };

    let (assessment_rng, interest_rng) = match config.assessment.rng_seed {
        Some(seed) => (StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed.wrapping_add(1))),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let assessment = AssessmentController::new(
        session_store::<AssessmentSession>(&config.storage, "assessment"),
        Arc::new(catalog.questions),
        Arc::new(catalog.estimator),
        Arc::new(BanditState::new()),
        Arc::clone(&log),
        assessment_rng,
        AssessmentSettings::from(&config.assessment),
    );

    let interest = InterestQuizHandler::new(
        session_store::<InterestQuizSession>(&config.storage, "interest"),
        Arc::new(catalog.interest_items),
        Arc::clone(&log),
        interest_rng,
    );

    let weights = FusionWeights::new(config.recommender.alpha, config.recommender.beta)?;
    let recommender = SignalFusionRecommender::new(
        catalog.prior,
        catalog.matrix,
        Arc::new(StaticClusterEnricher::new(catalog.descriptions)),
        weights,
    );
    let recommendation = RecommendClustersHandler::new(Arc::new(recommender), log, config.recommender.top_k);

    tracing::info!(
        storage = ?config.storage.backend,
        result_log = config.data.log_dir.is_some(),
        seeded = config.assessment.rng_seed.is_some(),
        "application services ready"
    );

    Ok(AppState {
        assessment: Arc::new(assessment),
        interest: Arc::new(interest),
        recommendation: Arc::new(recommendation),
    })
}

fn session_store<S>(config: &StorageConfig, kind: &str) -> Arc<dyn SessionStore<S>>
where
    S: Clone + serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static,
{
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::<S>::new()),
        StorageBackend::File => Arc::new(FileSessionStore::<S>::new(config.directory_for(kind))),
    }
}
