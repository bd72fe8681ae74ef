//! Best-effort result logging shared by the handlers.

use crate::ports::{LogRecord, ResultLog};

/// Appends `record`, logging and swallowing any failure.
pub async fn append_best_effort(log: &dyn ResultLog, record: LogRecord) {
    if let Err(e) = log.append(&record).await {
        tracing::warn!(error = %e, "result log append failed");
    }
}
