//! Category description loader.
//!
//! The name column is the first header that mentions both "career" and
//! "cluster" (underscores and dashes read as spaces), falling back to any
//! header containing "cluster"; descriptions come from the `About` column.
//! A missing file or missing columns only produce a warning: enrichment
//! falls back to generic text.

use std::io::Read;
use std::path::Path;

use super::CatalogError;
use crate::domain::recommendation::CategoryDescriptions;

pub fn load_descriptions(path: &Path) -> CategoryDescriptions {
    let source = path.display().to_string();
    let result = std::fs::File::open(path)
        .map_err(|e| CatalogError::io(&source, e))
        .and_then(|file| parse_descriptions(file, &source));
    match result {
        Ok(descriptions) => descriptions,
        Err(e) => {
            tracing::warn!(error = %e, "category descriptions unavailable, using generic text");
            CategoryDescriptions::new()
        }
    }
}

pub fn parse_descriptions<R: Read>(reader: R, source: &str) -> Result<CategoryDescriptions, CatalogError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(|e| CatalogError::parse(source, e))?.clone();

    let spaced: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase().replace(['_', '-'], " "))
        .collect();
    let name_col = spaced
        .iter()
        .position(|h| h.contains("career") && h.contains("cluster"))
        .or_else(|| headers.iter().position(|h| h.to_lowercase().contains("cluster")))
        .ok_or_else(|| CatalogError::missing_column(source, "Career Cluster"))?;
    let about_col = spaced
        .iter()
        .position(|h| h == "about")
        .ok_or_else(|| CatalogError::missing_column(source, "About"))?;

    let mut descriptions = CategoryDescriptions::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::parse(source, e))?;
        let name = record.get(name_col).unwrap_or("").trim();
        let about = record.get(about_col).unwrap_or("").trim();
        if name.eq_ignore_ascii_case("nan") || about.eq_ignore_ascii_case("nan") {
            continue;
        }
        descriptions.insert(name, about);
    }

    tracing::info!(source, categories = descriptions.len(), "category descriptions loaded");
    Ok(descriptions)
}
