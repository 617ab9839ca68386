use crate::types::lookup_key::LookupKey;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Worker limit must be at least 1")]
    InvalidWorkerLimit,

    #[error("Background lookup task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' cannot be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Unparseable date '{value}' in column '{column}' at row {row}")]
    InvalidDate {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Non-finite coordinate {value} in column '{column}' at row {row}")]
    InvalidCoordinate {
        column: String,
        row: usize,
        value: f64,
    },

    // Only reachable if a build breaks its one-entry-per-key guarantee.
    #[error("No cached observation for key {0}")]
    MissingCacheEntry(LookupKey),

    #[error("Failed to append weather columns")]
    ColumnAppend(#[source] PolarsError),
}
