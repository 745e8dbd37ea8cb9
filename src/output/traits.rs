//! Output sink trait and error types

use crate::movie::MovieRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for finished movie records
///
/// Records arrive in discovery order, one call per successfully parsed row.
/// Sinks never deduplicate or rewrite what they have already received.
pub trait RecordSink {
    /// Appends one record
    fn write_record(&mut self, record: &MovieRecord) -> OutputResult<()>;

    /// Flushes anything still buffered
    fn finish(&mut self) -> OutputResult<()>;
}

/// In-memory sink, mostly useful for tests and dry runs
impl RecordSink for Vec<MovieRecord> {
    fn write_record(&mut self, record: &MovieRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
