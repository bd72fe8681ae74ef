//! Static lookup tables: label → category prior, category → six-dimension
//! similarity weights.

use std::collections::{BTreeSet, HashMap};

use crate::domain::foundation::{IntegrityWarning, ValidationError};
use crate::domain::interest::RiasecScores;

/// Unnormalized prior weight per category, keyed by trait label.
#[derive(Debug, Clone)]
pub struct ClusterPriorTable {
    categories: Vec<String>,
    rows: HashMap<String, Vec<f64>>,
}

impl ClusterPriorTable {
    /// Builds the table. Labels are matched case-insensitively; every row
    /// must have one finite non-negative weight per category.
    pub fn new(categories: Vec<String>, rows: Vec<(String, Vec<f64>)>) -> Result<Self, ValidationError> {
        if categories.is_empty() {
            return Err(ValidationError::empty_field("categories"));
        }
        let mut seen = BTreeSet::new();
        for name in &categories {
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::invalid_format(
                    "categories",
                    format!("duplicate category '{}'", name),
                ));
            }
        }

        let mut by_label = HashMap::with_capacity(rows.len());
        for (label, weights) in rows {
            let key = label.trim().to_uppercase();
            if key.is_empty() {
                return Err(ValidationError::empty_field("label"));
            }
            if weights.len() != categories.len() {
                return Err(ValidationError::wrong_length(
                    format!("prior row '{}'", key),
                    categories.len(),
                    weights.len(),
                ));
            }
            if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
                return Err(ValidationError::invalid_format(
                    format!("prior row '{}'", key),
                    format!("weights must be finite and non-negative, got {}", bad),
                ));
            }
            if by_label.insert(key.clone(), weights).is_some() {
                return Err(ValidationError::invalid_format(
                    "label",
                    format!("duplicate prior row '{}'", key),
                ));
            }
        }

        Ok(Self {
            categories,
            rows: by_label,
        })
    }

    /// Category names in column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row(&self, label: &str) -> Option<&[f64]> {
        self.rows.get(&label.trim().to_uppercase()).map(Vec::as_slice)
    }

    /// Prior distribution over categories for `label`, in column order.
    ///
    /// An unknown label gets a uniform prior; a zero row stays zero.
    pub fn distribution(&self, label: &str) -> Vec<f64> {
        let weights = match self.row(label) {
            Some(row) => row.to_vec(),
            None => {
                tracing::debug!(label, "label has no prior row, using uniform prior");
                vec![1.0; self.categories.len()]
            }
        };
        normalize(weights)
    }
}

/// Six-dimension weights per category for the dot-product similarity.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<(String, RiasecScores)>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<(String, RiasecScores)>) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::empty_field("similarity_matrix"));
        }
        let mut seen = BTreeSet::new();
        for (name, weights) in &rows {
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::invalid_format(
                    "similarity_matrix",
                    format!("duplicate category '{}'", name),
                ));
            }
            weights.validate(name)?;
        }
        Ok(Self { rows })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }

    pub fn weights(&self, category: &str) -> Option<&RiasecScores> {
        self.rows.iter().find(|(name, _)| name == category).map(|(_, w)| w)
    }

    /// Dot product of `profile` with every category's weights, normalized to
    /// sum 1 (a zero total is left as is).
    pub fn similarity(&self, profile: &RiasecScores) -> HashMap<String, f64> {
        let raw: Vec<f64> = self
            .rows
            .iter()
            .map(|(_, w)| {
                w.to_array()
                    .iter()
                    .zip(profile.to_array())
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect();
        self.rows
            .iter()
            .map(|(name, _)| name.clone())
            .zip(normalize(raw))
            .collect()
    }
}

/// Categories present in one table but not the other.
pub fn check_integrity(prior: &ClusterPriorTable, matrix: &SimilarityMatrix) -> Vec<IntegrityWarning> {
    let in_prior: BTreeSet<&str> = prior.categories().iter().map(String::as_str).collect();
    let in_matrix: BTreeSet<&str> = matrix.categories().collect();

    let mut warnings: Vec<IntegrityWarning> = in_prior
        .difference(&in_matrix)
        .map(|c| IntegrityWarning::category_mismatch(*c, "similarity matrix"))
        .collect();
    warnings.extend(
        in_matrix
            .difference(&in_prior)
            .map(|c| IntegrityWarning::category_mismatch(*c, "cluster prior table")),
    );
    warnings
}

/// Divides by the sum; a zero sum divides by one.
pub(crate) fn normalize(values: Vec<f64>) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    let divisor = if total == 0.0 { 1.0 } else { total };
    values.into_iter().map(|v| v / divisor).collect()
}
