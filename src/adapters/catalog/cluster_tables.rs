//! Cluster prior table and similarity matrix loaders.
//!
//! Prior CSV: a label column (`MBTI` or `label`, else the first column)
//! followed by one column per category. Matrix CSV: a `Cluster` column plus
//! `R,I,A,S,E,C` columns; any other columns are ignored.

use std::io::Read;
use std::path::Path;

use super::csv_util::{cell, find_column, row_number};
use super::CatalogError;
use crate::domain::interest::{RiasecCode, RiasecScores};
use crate::domain::recommendation::{ClusterPriorTable, SimilarityMatrix};

pub fn load_prior_table(path: &Path) -> Result<ClusterPriorTable, CatalogError> {
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::io(&source, e))?;
    parse_prior_table(file, &source)
}

pub fn parse_prior_table<R: Read>(reader: R, source: &str) -> Result<ClusterPriorTable, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().map_err(|e| CatalogError::parse(source, e))?.clone();
    let label_col = find_column(&headers, &["MBTI", "label"]).unwrap_or(0);

    let category_cols: Vec<usize> = (0..headers.len()).filter(|i| *i != label_col).collect();
    let categories: Vec<String> = category_cols
        .iter()
        .map(|i| headers[*i].trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CatalogError::parse(source, e))?;
        let row = row_number(index);
        let weights = category_cols
            .iter()
            .map(|i| parse_weight(cell(&record, *i), source, row))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push((cell(&record, label_col).to_string(), weights));
    }

    let table = ClusterPriorTable::new(categories, rows).map_err(|e| CatalogError::invalid(source, e))?;
    tracing::info!(
        source,
        categories = table.categories().len(),
        labels = table.labels().count(),
        "cluster prior table loaded"
    );
    Ok(table)
}

pub fn load_similarity_matrix(path: &Path) -> Result<SimilarityMatrix, CatalogError> {
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::io(&source, e))?;
    parse_similarity_matrix(file, &source)
}

pub fn parse_similarity_matrix<R: Read>(reader: R, source: &str) -> Result<SimilarityMatrix, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().map_err(|e| CatalogError::parse(source, e))?.clone();
    let name_col =
        find_column(&headers, &["Cluster"]).ok_or_else(|| CatalogError::missing_column(source, "Cluster"))?;
    let mut code_cols = [0usize; 6];
    for code in RiasecCode::ALL {
        let name = code.to_string();
        code_cols[code.index()] =
            find_column(&headers, &[name.as_str()]).ok_or_else(|| CatalogError::missing_column(source, name.clone()))?;
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CatalogError::parse(source, e))?;
        let row = row_number(index);
        let mut weights = RiasecScores::default();
        for code in RiasecCode::ALL {
            weights.set(code, parse_weight(cell(&record, code_cols[code.index()]), source, row)?);
        }
        rows.push((cell(&record, name_col).to_string(), weights));
    }

    let matrix = SimilarityMatrix::new(rows).map_err(|e| CatalogError::invalid(source, e))?;
    tracing::info!(source, categories = matrix.categories().count(), "similarity matrix loaded");
    Ok(matrix)
}

fn parse_weight(raw: &str, source: &str, row: usize) -> Result<f64, CatalogError> {
    raw.parse::<f64>()
        .map_err(|_| CatalogError::invalid_row(source, row, format!("'{}' is not a number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_table_reads_label_rows() {
        let csv = "MBTI,Education,Arts,STEM\nENFJ,5,4,1\nINTJ,1,2,6\n";
        let table = parse_prior_table(csv.as_bytes(), "prior.csv").unwrap();
        assert_eq!(table.categories(), &["Education", "Arts", "STEM"]);
        assert_eq!(table.row("intj"), Some(&[1.0, 2.0, 6.0][..]));
    }

    #[test]
    fn prior_label_column_defaults_to_first() {
        let csv = "type,Law,Arts\nISTP,1,1\n";
        let table = parse_prior_table(csv.as_bytes(), "prior.csv").unwrap();
        assert!(table.row("ISTP").is_some());
    }

    #[test]
    fn non_numeric_weight_names_the_row() {
        let csv = "MBTI,Education\nENFJ,lots\n";
        assert!(matches!(
            parse_prior_table(csv.as_bytes(), "prior.csv"),
            Err(CatalogError::InvalidRow { row: 2, .. })
        ));
    }

    #[test]
    fn matrix_reads_six_columns_in_any_order() {
        let csv = "Cluster,C,E,S,A,I,R,Notes\nArts,0,0.2,0.3,1,0,0,creative\n";
        let matrix = parse_similarity_matrix(csv.as_bytes(), "matrix.csv").unwrap();
        let w = matrix.weights("Arts").unwrap();
        assert_eq!(w.get(RiasecCode::A), 1.0);
        assert_eq!(w.get(RiasecCode::E), 0.2);
    }

    #[test]
    fn matrix_requires_every_code_column() {
        let csv = "Cluster,R,I,A,S,E\nArts,0,0,1,0,0\n";
        assert!(matches!(
            parse_similarity_matrix(csv.as_bytes(), "matrix.csv"),
            Err(CatalogError::MissingColumn { ref column, .. }) if column == "C"
        ));
    }
}
