use std::path::PathBuf;

use thiserror::Error;

use crate::models::{RecordKind, UnknownKind};

/// Failures while resolving records from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {source}")]
    UnknownKind {
        row: usize,
        #[source]
        source: UnknownKind,
    },

    #[error("row {row}: {kind} records require a value for `{field}`")]
    MissingField {
        row: usize,
        kind: RecordKind,
        field: &'static str,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sample catalog date {year}-{month:02}-{day:02} {hour:02}:00 does not exist")]
    InvalidSampleDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
