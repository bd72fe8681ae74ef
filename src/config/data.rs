//! Static data locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Paths to the catalog inputs loaded at startup
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Yes/No question bank (CSV)
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,

    /// Trained network weights (JSON)
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,

    /// Label x category prior table (CSV)
    #[serde(default = "default_cluster_prior_path")]
    pub cluster_prior_path: PathBuf,

    /// Category x interest-code similarity matrix (CSV)
    #[serde(default = "default_similarity_matrix_path")]
    pub similarity_matrix_path: PathBuf,

    /// Category descriptions (CSV, optional at runtime)
    #[serde(default = "default_cluster_descriptions_path")]
    pub cluster_descriptions_path: PathBuf,

    /// Interest quiz items (CSV)
    #[serde(default = "default_interest_items_path")]
    pub interest_items_path: PathBuf,

    /// Directory for the CSV result log; no log when unset
    pub log_dir: Option<PathBuf>,
}

impl DataConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("data.questions_path", &self.questions_path),
            ("data.weights_path", &self.weights_path),
            ("data.cluster_prior_path", &self.cluster_prior_path),
            ("data.similarity_matrix_path", &self.similarity_matrix_path),
            ("data.interest_items_path", &self.interest_items_path),
        ];
        for (name, path) in required {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            questions_path: default_questions_path(),
            weights_path: default_weights_path(),
            cluster_prior_path: default_cluster_prior_path(),
            similarity_matrix_path: default_similarity_matrix_path(),
            cluster_descriptions_path: default_cluster_descriptions_path(),
            interest_items_path: default_interest_items_path(),
            log_dir: None,
        }
    }
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("data/questions.csv")
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("data/weights.json")
}

fn default_cluster_prior_path() -> PathBuf {
    PathBuf::from("data/cluster_prior.csv")
}

fn default_similarity_matrix_path() -> PathBuf {
    PathBuf::from("data/similarity_matrix.csv")
}

fn default_cluster_descriptions_path() -> PathBuf {
    PathBuf::from("data/cluster_descriptions.csv")
}

fn default_interest_items_path() -> PathBuf {
    PathBuf::from("data/interest_items.csv")
}
