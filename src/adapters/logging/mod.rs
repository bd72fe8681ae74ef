//! Result Log Adapters
//!
//! - **CsvResultLog** - Appends CSV rows under a log directory
//! - **NullResultLog** - Discards records (no log directory configured)

mod csv_result_log;
mod null_result_log;

pub use csv_result_log::CsvResultLog;
pub use null_result_log::NullResultLog;
