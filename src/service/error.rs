use reqwest::StatusCode;
use thiserror::Error;

/// Failure to download a BIF file.
///
/// A file that downloads but does not parse is not an error: the service
/// returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request failed before a response body was fully received.
    #[error("Failed to fetch BIF from {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error {status} fetching BIF from {url}")]
    HttpStatus { status: StatusCode, url: String },

    /// The body exceeds the configured size limit.
    #[error("BIF from {url} is {size} bytes, limit is {limit}")]
    TooLarge { url: String, size: u64, limit: u64 },

    /// The caller cancelled the fetch.
    #[error("Fetch of {url} was cancelled")]
    Cancelled { url: String },

    /// The background parse task panicked or was aborted.
    #[error("BIF parse task failed: {0}")]
    ParseTask(#[from] tokio::task::JoinError),
}

impl ServiceError {
    /// HTTP status of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Invalid arguments to [`thumbnail_url_for_second`](super::thumbnail_url_for_second).
#[derive(Debug, Error, PartialEq)]
pub enum ThumbnailUrlError {
    #[error("Video second cannot be negative: {0}")]
    NegativeSecond(f64),

    #[error("Video second must be finite: {0}")]
    InvalidSecond(f64),

    #[error("Thumbnail base URL is missing")]
    MissingBaseUrl,
}
