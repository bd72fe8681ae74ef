//! CSV Result Log Adapter
//!
//! Appends one row per record to a CSV file per record kind inside a log
//! directory. A header row is written when a file is first created.
//!
//! Interest answer sets are stored as a JSON object per row and read back
//! as response history; a missing file is an empty history.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::foundation::QuestionId;
use crate::domain::interest::{ResponseHistory, RiasecCode, RiasecScores};
use crate::ports::{LogError, LogRecord, ResultLog};

const INFERENCE_FILE: &str = "trait_inference.csv";
const INTEREST_FILE: &str = "interest_results.csv";
const RESPONSES_FILE: &str = "interest_responses.csv";
const ANSWERS_COLUMN: usize = 2;
const RECOMMENDATION_FILE: &str = "recommendations.csv";

/// CSV-backed result log
#[derive(Debug)]
pub struct CsvResultLog {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvResultLog {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, record: &LogRecord) -> PathBuf {
        let name = match record {
            LogRecord::TraitInference { .. } => INFERENCE_FILE,
            LogRecord::InterestScore { .. } => INTEREST_FILE,
            LogRecord::InterestResponses { .. } => RESPONSES_FILE,
            LogRecord::Recommendation { .. } => RECOMMENDATION_FILE,
        };
        self.dir.join(name)
    }
}

fn header(record: &LogRecord) -> Vec<String> {
    match record {
        LogRecord::TraitInference { .. } => ["IE", "SN", "TF", "JP", "label", "uncertainty", "timestamp"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        LogRecord::InterestScore { .. } => {
            let mut cols: Vec<String> = ["session_id", "user_id", "code", "confidence"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            for suffix in ["sum", "percent", "normalized"] {
                cols.extend(RiasecCode::ALL.iter().map(|c| format!("{}_{}", c, suffix)));
            }
            cols.push("timestamp".to_string());
            cols
        }
        LogRecord::InterestResponses { .. } => ["session_id", "user_id", "answers", "timestamp"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        LogRecord::Recommendation { .. } => ["label", "clusters", "timestamp"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn scores(values: &RiasecScores) -> impl Iterator<Item = String> {
    values.to_array().into_iter().map(|v| v.to_string())
}

fn row(record: &LogRecord) -> Result<Vec<String>, LogError> {
    let cols = match record {
        LogRecord::TraitInference {
            features,
            label,
            uncertainty,
            timestamp,
        } => {
            let mut cols: Vec<String> = features.iter().map(|v| v.to_string()).collect();
            cols.push(label.clone());
            cols.push(uncertainty.to_string());
            cols.push(timestamp.to_rfc3339());
            cols
        }
        LogRecord::InterestScore {
            session_id,
            user_id,
            code,
            confidence,
            sums,
            percents,
            normalized,
            timestamp,
        } => {
            let mut cols = vec![
                session_id.to_string(),
                user_id.to_string(),
                code.clone(),
                confidence.to_string(),
            ];
            cols.extend(scores(sums));
            cols.extend(scores(percents));
            cols.extend(scores(normalized));
            cols.push(timestamp.to_rfc3339());
            cols
        }
        LogRecord::InterestResponses {
            session_id,
            user_id,
            answers,
            timestamp,
        } => {
            let answers: BTreeMap<&str, u8> = answers.iter().map(|(id, v)| (id.as_str(), *v)).collect();
            let encoded =
                serde_json::to_string(&answers).map_err(|e| LogError::EncodingFailed(e.to_string()))?;
            vec![
                session_id.to_string(),
                user_id.to_string(),
                encoded,
                timestamp.to_rfc3339(),
            ]
        }
        LogRecord::Recommendation {
            label,
            clusters,
            timestamp,
        } => vec![label.clone(), clusters.join("|"), timestamp.to_rfc3339()],
    };
    Ok(cols)
}

/// Parses one answers cell. Blank or invalid ids are dropped.
fn decode_answers(cell: &str) -> Result<BTreeMap<QuestionId, u8>, LogError> {
    let raw: BTreeMap<String, u8> =
        serde_json::from_str(cell).map_err(|e| LogError::DecodingFailed(e.to_string()))?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, v)| QuestionId::new(id).ok().map(|id| (id, v)))
        .collect())
}

/// Reads every answer set from a responses file, skipping rows that do not
/// parse.
fn decode_history(bytes: &[u8]) -> ResponseHistory {
    let mut history = ResponseHistory::default();
    let mut skipped = 0usize;
    for record in csv::Reader::from_reader(bytes).records() {
        let answers = record
            .map_err(|e| LogError::DecodingFailed(e.to_string()))
            .and_then(|r| decode_answers(r.get(ANSWERS_COLUMN).unwrap_or_default()));
        match answers {
            Ok(answers) => history.push(answers),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = history.len(), "skipped unreadable interest response rows");
    }
    history
}

fn encode(rows: &[Vec<String>]) -> Result<Vec<u8>, LogError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in rows {
        writer
            .write_record(r)
            .map_err(|e| LogError::EncodingFailed(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| LogError::EncodingFailed(e.to_string()))
}

#[async_trait]
impl ResultLog for CsvResultLog {
    async fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        let _guard = self.write_lock.lock().await;
        let path = self.file_for(record);

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| LogError::IoError(e.to_string()))?;
        let is_new = match fs::metadata(&path).await {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let mut rows = Vec::with_capacity(2);
        if is_new {
            rows.push(header(record));
        }
        rows.push(row(record)?);
        let bytes = encode(&rows)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| LogError::IoError(e.to_string()))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| LogError::IoError(e.to_string()))?;
        file.flush().await.map_err(|e| LogError::IoError(e.to_string()))?;
        Ok(())
    }

    async fn response_history(&self) -> Result<Option<ResponseHistory>, LogError> {
        let _guard = self.write_lock.lock().await;
        let bytes = match fs::read(self.dir.join(RESPONSES_FILE)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Some(ResponseHistory::default())),
            Err(e) => return Err(LogError::IoError(e.to_string())),
        };
        Ok(Some(decode_history(&bytes)))
    }
}
