//! Delimited file storage.
//!
//! Records become rows of a UTF-8 CSV file. The header is taken from the
//! first record by default, so keys first seen in later records are dropped;
//! `HeaderPolicy::Union` keeps them instead. Missing values are written as
//! empty fields.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{HeaderPolicy, OutputConfig, OutputRecord};
use crate::storage::{RecordStorage, WriteSummary};

/// Writes records to a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
    delimiter: u8,
    header: HeaderPolicy,
}

/// Rendered file contents and the header decisions behind them.
struct Rendered {
    bytes: Vec<u8>,
    columns: Vec<String>,
    dropped_columns: Vec<String>,
}

impl CsvStorage {
    /// Create a storage writing to `path` with the given output settings.
    pub fn new(path: impl Into<PathBuf>, config: &OutputConfig) -> Result<Self> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| AppError::config("output.delimiter must be an ASCII character"))?;

        Ok(Self {
            path: path.into(),
            delimiter,
            header: config.header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn header_columns(&self, records: &[OutputRecord]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        let sources = match self.header {
            HeaderPolicy::FirstRecord => &records[..records.len().min(1)],
            HeaderPolicy::Union => records,
        };

        for record in sources {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    fn render(&self, records: &[OutputRecord]) -> Result<Rendered> {
        let columns = self.header_columns(records);

        let mut dropped_columns: Vec<String> = Vec::new();
        for key in records.iter().flat_map(|r| r.keys()) {
            if !columns.iter().any(|c| c == key) && !dropped_columns.iter().any(|c| c == key) {
                dropped_columns.push(key.to_string());
            }
        }

        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(::csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))?;

        Ok(Rendered {
            bytes,
            columns,
            dropped_columns,
        })
    }

    /// Sibling path the file is staged at, `<file name>.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    ///
    /// The temp file is removed again when either step fails.
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        if let Err(e) = write_then_rename(&tmp, &self.path, bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {cleanup}", tmp.display());
            }
            return Err(e.into());
        }
        Ok(())
    }
}

async fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(tmp, target).await
}

#[async_trait]
impl RecordStorage for CsvStorage {
    async fn write_records(&self, records: &[OutputRecord]) -> Result<Option<WriteSummary>> {
        if records.is_empty() {
            log::debug!("No records, skipping {}", self.path.display());
            return Ok(None);
        }

        let rendered = self.render(records)?;
        if !rendered.dropped_columns.is_empty() {
            log::warn!(
                "{} column(s) missing from the header were dropped: {}",
                rendered.dropped_columns.len(),
                rendered.dropped_columns.join(", ")
            );
        }

        self.write_bytes(&rendered.bytes).await?;
        log::info!(
            "Wrote {} rows with {} columns to {}",
            records.len(),
            rendered.columns.len(),
            self.path.display()
        );

        Ok(Some(WriteSummary {
            location: self.path.display().to_string(),
            row_count: records.len(),
            columns: rendered.columns,
            dropped_columns: rendered.dropped_columns,
        }))
    }
}
