//! Frame image lookup for seek previews.
//!
//! A [`FrameImageSource`] answers "which thumbnail belongs to this playback
//! position". The BIF-backed implementation slices JPEG bytes out of the
//! original buffer on demand and memoizes the encoded data URI per 10-second
//! bucket until the playback session tears it down with
//! [`FrameImageSource::clear_cache`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::FrameImageOffset;

/// Prefix of every URI returned by [`FrameImageSource::base64_image`].
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Width of a lookup bucket. One thumbnail is resolved per bucket regardless
/// of the capture cadence recorded in the file.
const BUCKET_MILLIS: u64 = 10_000;

/// Source of trickplay images for playback positions.
pub trait FrameImageSource: Send + Sync {
    /// Raw encoded image bytes covering `position_millis`, if any.
    fn image_data(&self, position_millis: u64) -> Option<Bytes>;

    /// The image for `position_millis` as a `data:image/jpeg;base64,` URI.
    fn base64_image(&self, position_millis: u64) -> Option<Arc<str>>;

    /// Release every cached image. Safe to call more than once.
    fn clear_cache(&self);
}

#[derive(Default)]
struct FrameCache {
    entries: HashMap<usize, Arc<str>>,
    closed: bool,
}

/// [`FrameImageSource`] backed by a parsed BIF buffer.
pub struct BifFrameImageSource {
    buffer: Bytes,
    offsets: Vec<FrameImageOffset>,
    cache: Mutex<FrameCache>,
}

impl BifFrameImageSource {
    /// Wrap a BIF buffer and its offset table.
    ///
    /// Tables with fewer than two entries are accepted; every lookup on them
    /// returns `None`.
    pub fn new(buffer: Bytes, offsets: Vec<FrameImageOffset>) -> Self {
        Self {
            buffer,
            offsets,
            cache: Mutex::new(FrameCache::default()),
        }
    }

    /// Index of the offset entry that ends the frame shown at `position_millis`.
    ///
    /// Position 0 maps to 1. Any other position maps to
    /// `ceil(position_millis / 10_000) + 1`, clamped to `[1, len - 1]` so the
    /// result is always a valid end boundary.
    pub fn end_index(&self, position_millis: u64) -> usize {
        let last = self.offsets.len().saturating_sub(1).max(1);
        let index = if position_millis == 0 {
            1
        } else {
            usize::try_from(position_millis.div_ceil(BUCKET_MILLIS))
                .unwrap_or(usize::MAX)
                .saturating_add(1)
        };
        index.clamp(1, last)
    }

    /// Number of real frames in the table.
    pub fn frame_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// The offset table, terminator included.
    pub fn offsets(&self) -> &[FrameImageOffset] {
        &self.offsets
    }

    /// Number of memoized data URIs.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    /// Whether [`FrameImageSource::clear_cache`] has run.
    pub fn is_closed(&self) -> bool {
        self.cache.lock().closed
    }
}

impl FrameImageSource for BifFrameImageSource {
    fn image_data(&self, position_millis: u64) -> Option<Bytes> {
        if self.offsets.len() < 2 {
            tracing::warn!(
                entries = self.offsets.len(),
                "Frame offset table too small, no trickplay image available"
            );
            return None;
        }

        let end = self.end_index(position_millis);
        let start = self.offsets[end - 1].offset_bytes as usize;
        let stop = self.offsets[end].offset_bytes as usize;

        if start >= stop || stop > self.buffer.len() {
            tracing::warn!(
                start,
                stop,
                buffer_len = self.buffer.len(),
                "Invalid frame byte range in BIF buffer"
            );
            return None;
        }

        Some(self.buffer.slice(start..stop))
    }

    fn base64_image(&self, position_millis: u64) -> Option<Arc<str>> {
        let bucket = self.end_index(position_millis);
        if let Some(uri) = self.cache.lock().entries.get(&bucket) {
            return Some(Arc::clone(uri));
        }

        let data = self.image_data(position_millis)?;
        let uri: Arc<str> = Arc::from(format!("{}{}", JPEG_DATA_URI_PREFIX, STANDARD.encode(&data)));

        // Encoding happens outside the lock; a teardown that ran meanwhile
        // must not see the entry come back.
        let mut cache = self.cache.lock();
        if !cache.closed {
            cache.entries.insert(bucket, Arc::clone(&uri));
        }

        Some(uri)
    }

    fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        let released = cache.entries.len();
        cache.entries.clear();
        cache.closed = true;

        if released > 0 {
            tracing::debug!(released, "Released cached trickplay frames");
        }
    }
}

impl fmt::Debug for BifFrameImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BifFrameImageSource")
            .field("buffer_len", &self.buffer.len())
            .field("frames", &self.frame_count())
            .field("cached", &self.cached_len())
            .finish()
    }
}
