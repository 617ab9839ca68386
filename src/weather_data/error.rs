use crate::types::daily_variable::DailyVariable;
use thiserror::Error;

/// Why a single archive lookup produced no observation.
///
/// These never escape [`ArchiveClient::lookup`](crate::ArchiveClient), which
/// logs them and records the key as absent. They are returned directly by
/// [`ArchiveClient::fetch_daily`](crate::ArchiveClient::fetch_daily).
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Unparseable date '{0}'")]
    InvalidDate(String),

    #[error("Failed to build archive request")]
    RequestBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode archive response body from {0}")]
    BodyDecode(String, #[source] reqwest::Error),

    #[error("Archive response from {0} has no 'daily' section")]
    MissingDaily(String),

    #[error("Archive response from {url} has no value for '{variable}'")]
    IncompleteSeries { url: String, variable: DailyVariable },
}
