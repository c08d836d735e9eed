use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use trickplay_bif::FrameImageSource;

use super::SeekPreview;
use crate::service::{thumbnail_url_for_second, BifService, ServiceError};

/// Trickplay fields of a catalog title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleTrickplay {
    /// Location of the title's BIF file.
    #[serde(default)]
    pub bif_url: Option<String>,
    /// Base URL of server-rendered per-block thumbnails.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Trickplay state for one playback of one title.
///
/// The frame cache is released exactly once, by [`end`](Self::end) or on drop,
/// whichever comes first.
pub struct PlaybackSession {
    title: TitleTrickplay,
    source: Option<Arc<dyn FrameImageSource>>,
    ended: AtomicBool,
}

impl PlaybackSession {
    /// Wrap an already loaded source, or `None` for a title without frames.
    pub fn new(title: TitleTrickplay, source: Option<Arc<dyn FrameImageSource>>) -> Self {
        Self {
            title,
            source,
            ended: AtomicBool::new(false),
        }
    }

    /// Start a session, loading the title's BIF file if it has one.
    ///
    /// Trickplay is optional: any fetch or parse failure is logged and the
    /// session starts without frames. Cancel `token` when the player goes away
    /// before the download finishes.
    pub async fn start(
        service: &BifService,
        title: TitleTrickplay,
        token: &CancellationToken,
    ) -> Self {
        let source = match title.bif_url.as_deref() {
            Some(url) => match service.fetch_cancellable(url, token).await {
                Ok(Some(source)) => {
                    tracing::info!(url, frames = source.frame_count(), "Loaded trickplay frames");
                    Some(Arc::new(source) as Arc<dyn FrameImageSource>)
                }
                Ok(None) => None,
                Err(e @ ServiceError::Cancelled { .. }) => {
                    tracing::debug!("{}", e);
                    None
                }
                Err(e) => {
                    tracing::warn!("Trickplay unavailable: {}", e);
                    None
                }
            },
            None => None,
        };

        Self::new(title, source)
    }

    /// Trickplay metadata the session was started with.
    pub fn title(&self) -> &TitleTrickplay {
        &self.title
    }

    /// Whether BIF frames are available for previews.
    pub fn has_frames(&self) -> bool {
        self.source.is_some() && !self.is_ended()
    }

    /// Whether [`end`](Self::end) has run.
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::Acquire)
    }

    /// Resolve the seek preview for `position_millis`.
    ///
    /// Order: server-rendered thumbnail URL, then BIF frame, then the
    /// transparent placeholder.
    pub fn preview_at(&self, position_millis: u64) -> SeekPreview {
        if let Some(base_url) = self.title.thumbnail_url.as_deref() {
            match thumbnail_url_for_second(position_millis as f64 / 1000.0, base_url) {
                Ok(url) => return SeekPreview::Url(url),
                Err(e) => tracing::debug!("Skipping thumbnail URL: {}", e),
            }
        }

        if !self.is_ended() {
            if let Some(uri) = self
                .source
                .as_ref()
                .and_then(|source| source.base64_image(position_millis))
            {
                return SeekPreview::Frame(uri);
            }
        }

        SeekPreview::Placeholder
    }

    /// Release trickplay resources. Later calls do nothing.
    pub fn end(&self) {
        if self.ended.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(source) = &self.source {
            source.clear_cache();
        }
        tracing::debug!("Trickplay session ended");
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.end();
    }
}
