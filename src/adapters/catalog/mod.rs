//! Catalog adapters.
//!
//! Startup loaders for the static inputs: the Yes/No question bank, the
//! trained weights artifact, the two recommendation lookup tables, category
//! descriptions and the interest quiz items.
//!
//! Everything except descriptions is required; a failure aborts startup
//! with a [`CatalogError`]. Non-fatal findings are returned as
//! [`IntegrityWarning`]s and logged once by [`Catalog::load`].

mod cluster_tables;
mod csv_util;
mod descriptions;
mod error;
mod interest_items;
mod question_bank;
mod weights;

pub use cluster_tables::{
    load_prior_table, load_similarity_matrix, parse_prior_table, parse_similarity_matrix,
};
pub use descriptions::{load_descriptions, parse_descriptions};
pub use error::CatalogError;
pub use interest_items::{load_interest_items, parse_interest_items};
pub use question_bank::{load_question_bank, parse_question_bank};
pub use weights::{load_estimator, parse_estimator};

use crate::config::DataConfig;
use crate::domain::estimator::TraitEstimator;
use crate::domain::foundation::IntegrityWarning;
use crate::domain::interest::InterestItemBank;
use crate::domain::personality::QuestionBank;
use crate::domain::recommendation::{
    check_integrity, CategoryDescriptions, ClusterPriorTable, SimilarityMatrix,
};

/// All static inputs, loaded once at startup.
#[derive(Debug)]
pub struct Catalog {
    pub questions: QuestionBank,
    pub estimator: TraitEstimator,
    pub interest_items: InterestItemBank,
    pub prior: ClusterPriorTable,
    pub matrix: SimilarityMatrix,
    pub descriptions: CategoryDescriptions,
    pub warnings: Vec<IntegrityWarning>,
}

impl Catalog {
    pub fn load(data: &DataConfig) -> Result<Self, CatalogError> {
        let (questions, mut warnings) = load_question_bank(&data.questions_path)?;
        let estimator = load_estimator(&data.weights_path)?;
        let interest_items = load_interest_items(&data.interest_items_path)?;
        let prior = load_prior_table(&data.cluster_prior_path)?;
        let matrix = load_similarity_matrix(&data.similarity_matrix_path)?;
        let descriptions = load_descriptions(&data.cluster_descriptions_path);

        warnings.extend(check_integrity(&prior, &matrix));
        if !descriptions.is_empty() {
            warnings.extend(
                prior
                    .categories()
                    .iter()
                    .filter(|category| descriptions.lookup(category).is_none())
                    .map(IntegrityWarning::missing_description),
            );
        }
        for warning in &warnings {
            warning.log();
        }

        tracing::info!(
            questions = questions.len(),
            interest_items = interest_items.len(),
            categories = prior.categories().len(),
            labels = prior.labels().count(),
            warnings = warnings.len(),
            "catalog loaded"
        );

        Ok(Self {
            questions,
            estimator,
            interest_items,
            prior,
            matrix,
            descriptions,
            warnings,
        })
    }
}
