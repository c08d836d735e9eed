//! BIF parser.
//!
//! Validation failures and truncated input are expected conditions for a file
//! fetched from a CDN, so [`BifParser::parse`] logs them and returns `None`
//! instead of an error. [`BifParser::parse_index`] exposes the underlying
//! fallible parse for tooling that wants the reason.

use bytes::Bytes;

use crate::format::{read_u32_le, BifHeader, HEADER_SIZE, INDEX_ENTRY_SIZE, TERMINATOR_MARKER};
use crate::{BifFrameImageSource, Error, FrameImageOffset, Result};

/// Result of decoding the header and index of a BIF buffer.
#[derive(Debug, Clone)]
pub struct ParsedIndex {
    /// Decoded header.
    pub header: BifHeader,
    /// Frame offsets followed by the terminator entry (N + 1 entries).
    pub offsets: Vec<FrameImageOffset>,
    /// Whether the terminator carried the `0xFFFFFFFF` marker.
    pub terminator_valid: bool,
}

impl ParsedIndex {
    /// Number of real frames (the terminator is not counted).
    pub fn frame_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}

/// Parser for BIF trickplay containers.
pub struct BifParser;

impl BifParser {
    /// Parse a complete BIF buffer into a frame image source.
    ///
    /// Returns `None` when the buffer is not a readable BIF file; the reason is
    /// logged. Callers should treat `None` as "no trickplay available".
    pub fn parse(buffer: Bytes) -> Option<BifFrameImageSource> {
        match Self::parse_index(&buffer) {
            Ok(index) => {
                tracing::debug!(
                    frames = index.frame_count(),
                    multiplier = index.header.timestamp_multiplier,
                    bytes = buffer.len(),
                    "Parsed BIF index"
                );
                Some(BifFrameImageSource::new(buffer, index.offsets))
            }
            Err(e @ (Error::InvalidMagic | Error::UnsupportedVersion(_))) => {
                tracing::warn!("Rejected BIF file: {}", e);
                None
            }
            Err(e) => {
                tracing::error!("Failed to parse BIF file: {}", e);
                None
            }
        }
    }

    /// Decode the header and the offset table.
    pub fn parse_index(buf: &[u8]) -> Result<ParsedIndex> {
        let header = BifHeader::read(buf)?;

        // Reject before allocating for an index the buffer cannot hold.
        let need = header.index_end();
        if (buf.len() as u64) < need {
            return Err(Error::BufferUnderflow {
                need: usize::try_from(need).unwrap_or(usize::MAX),
                have: buf.len(),
            });
        }

        let mut offsets = Vec::with_capacity(header.image_count as usize + 1);
        let mut cursor = HEADER_SIZE;
        for _ in 0..header.image_count {
            let timestamp = read_u32_le(buf, cursor)?;
            let offset = read_u32_le(buf, cursor + 4)?;
            offsets.push(FrameImageOffset::from_raw(
                timestamp,
                header.timestamp_multiplier,
                offset,
            ));
            cursor += INDEX_ENTRY_SIZE;
        }

        let marker = read_u32_le(buf, cursor)?;
        let end_offset = read_u32_le(buf, cursor + 4)?;
        let terminator_valid = marker == TERMINATOR_MARKER;
        if !terminator_valid {
            tracing::warn!(
                marker = %format!("{:#010x}", marker),
                "BIF index terminator mismatch, frames may be missing"
            );
        }
        offsets.push(FrameImageOffset::terminator(end_offset));

        Ok(ParsedIndex {
            header,
            offsets,
            terminator_valid,
        })
    }
}
