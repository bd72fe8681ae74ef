//! Non-fatal data integrity findings.
//!
//! Loaders and table checks collect these instead of failing; callers log
//! them with `tracing::warn!` and carry on with a fallback.

use std::fmt;

/// One integrity finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// A category appears in one lookup table but not the other.
    CategoryMismatch { category: String, missing_from: String },
    /// No description is known for a category.
    MissingDescription { category: String },
    /// A malformed row was skipped while loading a source.
    SkippedRow {
        source: String,
        row: usize,
        reason: String,
    },
}

impl IntegrityWarning {
    pub fn category_mismatch(category: impl Into<String>, missing_from: impl Into<String>) -> Self {
        IntegrityWarning::CategoryMismatch {
            category: category.into(),
            missing_from: missing_from.into(),
        }
    }

    pub fn missing_description(category: impl Into<String>) -> Self {
        IntegrityWarning::MissingDescription {
            category: category.into(),
        }
    }

    pub fn skipped_row(source: impl Into<String>, row: usize, reason: impl Into<String>) -> Self {
        IntegrityWarning::SkippedRow {
            source: source.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Emits this finding at `warn` level.
    pub fn log(&self) {
        tracing::warn!(warning = %self, "data integrity warning");
    }
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::CategoryMismatch {
                category,
                missing_from,
            } => write!(f, "category '{}' is missing from {}", category, missing_from),
            IntegrityWarning::MissingDescription { category } => {
                write!(f, "no description for category '{}'", category)
            }
            IntegrityWarning::SkippedRow { source, row, reason } => {
                write!(f, "skipped row {} of {}: {}", row, source, reason)
            }
        }
    }
}
