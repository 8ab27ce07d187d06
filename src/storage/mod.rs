//! Storage abstractions for scraped records.

pub mod csv;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::OutputRecord;

// Re-export for convenience
pub use self::csv::CsvStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Where the records were written
    pub location: String,
    /// Number of data rows written
    pub row_count: usize,
    /// Header columns, in output order
    pub columns: Vec<String>,
    /// Keys present in some record but absent from the header
    pub dropped_columns: Vec<String>,
}

/// Trait for record storage backends.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Write all records in order.
    ///
    /// Returns `None` without touching the destination when `records` is empty.
    async fn write_records(&self, records: &[OutputRecord]) -> Result<Option<WriteSummary>>;
}
