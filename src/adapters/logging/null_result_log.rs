//! Result log that discards every record.

use async_trait::async_trait;

use crate::ports::{LogError, LogRecord, ResultLog};

/// Used when no log directory is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResultLog;

#[async_trait]
impl ResultLog for NullResultLog {
    async fn append(&self, _record: &LogRecord) -> Result<(), LogError> {
        Ok(())
    }
}
