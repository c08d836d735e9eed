//! BIF serialization.

use bytes::Bytes;

use crate::format::{
    DEFAULT_TIMESTAMP_MULTIPLIER, HEADER_SIZE, INDEX_ENTRY_SIZE, MAGIC_NUMBER, SUPPORTED_VERSION,
    TERMINATOR_MARKER,
};
use crate::{Error, Result};

/// Builder that packs encoded images into a BIF container.
///
/// Frames are written in the order they are added; the index is not sorted.
#[derive(Debug, Clone)]
pub struct BifWriter {
    timestamp_multiplier: u32,
    frames: Vec<(u32, Bytes)>,
}

impl Default for BifWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BifWriter {
    /// Create an empty writer using one-second timestamp units.
    pub fn new() -> Self {
        Self {
            timestamp_multiplier: DEFAULT_TIMESTAMP_MULTIPLIER,
            frames: Vec::new(),
        }
    }

    /// Set the milliseconds per raw timestamp unit stored in the header.
    pub fn timestamp_multiplier(mut self, multiplier: u32) -> Self {
        self.timestamp_multiplier = multiplier;
        self
    }

    /// Add a frame at `raw_timestamp` units.
    pub fn frame(mut self, raw_timestamp: u32, image: impl Into<Bytes>) -> Self {
        self.push_frame(raw_timestamp, image);
        self
    }

    /// Add a frame without consuming the builder.
    pub fn push_frame(&mut self, raw_timestamp: u32, image: impl Into<Bytes>) {
        self.frames.push((raw_timestamp, image.into()));
    }

    /// Number of frames added so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames were added.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize header, index, terminator and frame data.
    pub fn finish(&self) -> Result<Vec<u8>> {
        let data_start = HEADER_SIZE + (self.frames.len() + 1) * INDEX_ENTRY_SIZE;
        let total = data_start as u64
            + self
                .frames
                .iter()
                .map(|(_, image)| image.len() as u64)
                .sum::<u64>();
        if total > u32::MAX as u64 {
            return Err(Error::TooLarge(total));
        }

        let mut out = Vec::with_capacity(total as usize);
        out.extend_from_slice(&MAGIC_NUMBER);
        out.extend_from_slice(&SUPPORTED_VERSION.to_le_bytes());
        out.extend_from_slice(&(self.frames.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.timestamp_multiplier.to_le_bytes());
        out.resize(HEADER_SIZE, 0);

        let mut offset = data_start as u32;
        for (timestamp, image) in &self.frames {
            out.extend_from_slice(&timestamp.to_le_bytes());
            out.extend_from_slice(&offset.to_le_bytes());
            offset += image.len() as u32;
        }
        out.extend_from_slice(&TERMINATOR_MARKER.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());

        for (_, image) in &self.frames {
            out.extend_from_slice(image);
        }

        Ok(out)
    }
}
