//! Interest item loader.
//!
//! Columns `QID`, `Question`, `Key` (case-insensitive; `id`/`text`/`scale`
//! also accepted). Keys must be one of R, I, A, S, E, C.

use std::io::Read;
use std::path::Path;

use super::csv_util::{cell, find_column, row_number};
use super::CatalogError;
use crate::domain::foundation::QuestionId;
use crate::domain::interest::{InterestItem, InterestItemBank, RiasecCode};

pub fn load_interest_items(path: &Path) -> Result<InterestItemBank, CatalogError> {
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::io(&source, e))?;
    parse_interest_items(file, &source)
}

pub fn parse_interest_items<R: Read>(reader: R, source: &str) -> Result<InterestItemBank, CatalogError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(|e| CatalogError::parse(source, e))?.clone();

    let id_col = find_column(&headers, &["QID", "id"]).ok_or_else(|| CatalogError::missing_column(source, "QID"))?;
    let text_col =
        find_column(&headers, &["Question", "text"]).ok_or_else(|| CatalogError::missing_column(source, "Question"))?;
    let key_col = find_column(&headers, &["Key", "scale"]).ok_or_else(|| CatalogError::missing_column(source, "Key"))?;

    let mut items = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CatalogError::parse(source, e))?;
        let row = row_number(index);
        let key = cell(&record, key_col);
        let code = RiasecCode::parse(key).ok_or_else(|| {
            CatalogError::invalid_row(source, row, format!("unknown key '{}', expected one of R,I,A,S,E,C", key))
        })?;
        let id = QuestionId::new(cell(&record, id_col)).map_err(|e| CatalogError::invalid_row(source, row, e.to_string()))?;
        items.push(InterestItem {
            id,
            text: cell(&record, text_col).to_string(),
            code,
        });
    }

    let bank = InterestItemBank::new(items).map_err(|e| CatalogError::invalid(source, e))?;
    tracing::info!(source, items = bank.len(), "interest items loaded");
    Ok(bank)
}
