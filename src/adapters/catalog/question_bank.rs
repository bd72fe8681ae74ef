//! Yes/No question bank loader.
//!
//! Columns (case-insensitive): an id column (`S.No.`, `id`, `sno`, `s_no`,
//! `s no`), a text column (`Question`, `Questions`, `Question?`), `Yes` and
//! `No`. The axis comes from the pole pair of the Yes/No letters; rows that
//! do not form a pair are skipped with a warning.

use std::io::Read;
use std::path::Path;

use super::csv_util::{cell, find_column, row_number};
use super::CatalogError;
use crate::domain::foundation::{IntegrityWarning, QuestionId};
use crate::domain::personality::{Question, QuestionBank, TraitLetter};

const ID_COLUMNS: &[&str] = &["S.No.", "id", "sno", "s_no", "s no"];
const TEXT_COLUMNS: &[&str] = &["Question", "Questions", "Question?"];

pub fn load_question_bank(path: &Path) -> Result<(QuestionBank, Vec<IntegrityWarning>), CatalogError> {
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::io(&source, e))?;
    parse_question_bank(file, &source)
}

pub fn parse_question_bank<R: Read>(
    reader: R,
    source: &str,
) -> Result<(QuestionBank, Vec<IntegrityWarning>), CatalogError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(|e| CatalogError::parse(source, e))?.clone();

    let id_col = find_column(&headers, ID_COLUMNS).ok_or_else(|| CatalogError::missing_column(source, "S.No."))?;
    let text_col =
        find_column(&headers, TEXT_COLUMNS).ok_or_else(|| CatalogError::missing_column(source, "Question"))?;
    let yes_col = find_column(&headers, &["Yes"]).ok_or_else(|| CatalogError::missing_column(source, "Yes"))?;
    let no_col = find_column(&headers, &["No"]).ok_or_else(|| CatalogError::missing_column(source, "No"))?;

    let mut questions = Vec::new();
    let mut warnings = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = row_number(index);
        let record = record.map_err(|e| CatalogError::parse(source, e))?;

        let yes = TraitLetter::parse(cell(&record, yes_col));
        let no = TraitLetter::parse(cell(&record, no_col));
        let (Some(yes), Some(no)) = (yes, no) else {
            warnings.push(IntegrityWarning::skipped_row(source, row, "Yes/No are not trait letters"));
            continue;
        };
        let id = match QuestionId::new(cell(&record, id_col)) {
            Ok(id) => id,
            Err(e) => {
                warnings.push(IntegrityWarning::skipped_row(source, row, e.to_string()));
                continue;
            }
        };
        match Question::new(id, cell(&record, text_col), yes, no) {
            Ok(q) => questions.push(q),
            Err(e) => warnings.push(IntegrityWarning::skipped_row(source, row, e.to_string())),
        }
    }

    let bank = QuestionBank::new(questions).map_err(|e| CatalogError::invalid(source, e))?;
    tracing::info!(source, questions = bank.len(), skipped = warnings.len(), "question bank loaded");
    Ok((bank, warnings))
}
