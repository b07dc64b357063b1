//! Error taxonomy for the ingestion pipeline and report query.
//!
//! Every per-file variant is caught by [`crate::ingest::ingest_file`] and
//! turned into an [`crate::ingest::IngestionResult`]; only
//! [`IngestError::Connection`] stops a run before any file is attempted.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{} not found", path.display())]
    MissingSource { path: PathBuf },

    #[error("{} is empty", path.display())]
    EmptyFile { path: PathBuf },

    #[error("invalid schema for table '{table}': {reason}")]
    Schema { table: String, reason: String },

    #[error("failed to insert row {row} into '{table}': {reason}")]
    Insert {
        table: String,
        row: usize,
        reason: String,
    },

    #[error("transaction on '{table}' failed: {reason}")]
    Transaction { table: String, reason: String },

    #[error("failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("cannot open database: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("failed to close database: {0}")]
    Close(#[source] rusqlite::Error),

    #[error("query failed: {0}")]
    Query(#[source] rusqlite::Error),
}

impl IngestError {
    pub(crate) fn schema(table: &str, reason: impl Into<String>) -> Self {
        IngestError::Schema {
            table: table.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn insert(table: &str, row: usize, reason: impl Into<String>) -> Self {
        IngestError::Insert {
            table: table.to_string(),
            row,
            reason: reason.into(),
        }
    }

    pub(crate) fn transaction(table: &str, err: rusqlite::Error) -> Self {
        IngestError::Transaction {
            table: table.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        IngestError::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
