use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use trickplay_bif::{BifFrameImageSource, BifParser};

use super::ServiceError;
use crate::config::HttpConfig;

/// Downloads BIF files and turns them into frame image sources.
#[derive(Debug, Clone)]
pub struct BifService {
    client: Client,
    max_bif_bytes: u64,
}

impl BifService {
    /// Create a service using the timeout, user agent and size limit from `config`.
    pub fn new(config: &HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with config: {}", e);
                Client::new()
            });

        Self {
            client,
            max_bif_bytes: config.max_bif_bytes,
        }
    }

    /// Fetch `url` and parse the body as a BIF file.
    ///
    /// Network failures and non-success statuses are errors. A body that is not
    /// a valid BIF file yields `Ok(None)`: trickplay is unavailable but the
    /// caller has nothing to handle. No retries are attempted.
    pub async fn fetch_frame_image_source(
        &self,
        url: &str,
    ) -> Result<Option<BifFrameImageSource>, ServiceError> {
        let data = self.download(url).await?;

        // Parsing is CPU-bound over the whole buffer; keep it off the runtime threads.
        let source = tokio::task::spawn_blocking(move || BifParser::parse(data)).await?;

        if source.is_none() {
            tracing::warn!(url, "Downloaded BIF could not be parsed");
        }
        Ok(source)
    }

    /// Like [`fetch_frame_image_source`](Self::fetch_frame_image_source), but
    /// gives up with [`ServiceError::Cancelled`] once `token` is cancelled.
    ///
    /// A source that finishes parsing after cancellation is dropped unused.
    pub async fn fetch_cancellable(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Option<BifFrameImageSource>, ServiceError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(url, "BIF fetch cancelled");
                Err(ServiceError::Cancelled { url: url.to_string() })
            }
            result = self.fetch_frame_image_source(url) => result,
        }
    }

    async fn download(&self, url: &str) -> Result<Bytes, ServiceError> {
        tracing::debug!(url, "Fetching BIF");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        if let Some(size) = response.content_length() {
            self.check_size(url, size)?;
        }

        // Chunked responses carry no length up front, so the limit is also
        // applied to the running total as chunks arrive.
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| ServiceError::Request {
                url: url.to_string(),
                source,
            })?
        {
            self.check_size(url, (body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        let body = body.freeze();

        tracing::debug!(url, bytes = body.len(), "Fetched BIF");
        Ok(body)
    }

    fn check_size(&self, url: &str, size: u64) -> Result<(), ServiceError> {
        if size > self.max_bif_bytes {
            return Err(ServiceError::TooLarge {
                url: url.to_string(),
                size,
                limit: self.max_bif_bytes,
            });
        }
        Ok(())
    }
}
