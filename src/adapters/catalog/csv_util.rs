//! Small helpers shared by the CSV loaders.

use csv::StringRecord;

/// Position of the first header matching one of `candidates`, compared
/// trimmed and case-insensitively.
pub(crate) fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    candidates
        .iter()
        .find_map(|cand| normalized.iter().position(|h| *h == cand.to_lowercase()))
}

/// Trimmed cell, empty when the row is short.
pub(crate) fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// One-based data row number (the header is row 1).
pub(crate) fn row_number(index: usize) -> usize {
    index + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_columns_case_insensitively_in_candidate_order() {
        let headers = StringRecord::from(vec![" s.no. ", "QUESTIONS", "Yes", "No"]);
        assert_eq!(find_column(&headers, &["S.No.", "id"]), Some(0));
        assert_eq!(find_column(&headers, &["Question", "Questions"]), Some(1));
        assert_eq!(find_column(&headers, &["Key"]), None);
    }
}
