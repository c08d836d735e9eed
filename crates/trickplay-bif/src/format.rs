//! BIF container layout.
//!
//! ```text
//! offset  size  field
//! 0       8     magic number 89 42 49 46 0D 0A 1A 0A
//! 8       4     version (u32 LE), must be 0
//! 12      4     image count N (u32 LE)
//! 16      4     timestamp multiplier (u32 LE), 0 means 1000
//! 20      44    reserved
//! 64      8*N   index entries: u32 LE timestamp, u32 LE offset
//! 64+8N   8     terminator: u32 LE 0xFFFFFFFF, u32 LE end offset
//! ```

use crate::{Error, Result};

/// Fixed 8-byte signature at the start of every BIF file.
pub const MAGIC_NUMBER: [u8; 8] = [0x89, 0x42, 0x49, 0x46, 0x0D, 0x0A, 0x1A, 0x0A];

/// The only format version understood by the parser.
pub const SUPPORTED_VERSION: u32 = 0;

/// Size of the fixed header. The index starts right after it.
pub const HEADER_SIZE: usize = 64;

/// Size of one index entry (and of the terminator).
pub const INDEX_ENTRY_SIZE: usize = 8;

/// Expected first word of the terminator entry.
pub const TERMINATOR_MARKER: u32 = 0xFFFF_FFFF;

/// Milliseconds per timestamp unit when the header stores 0.
pub const DEFAULT_TIMESTAMP_MULTIPLIER: u32 = 1000;

const VERSION_OFFSET: usize = 8;
const IMAGE_COUNT_OFFSET: usize = 12;
const MULTIPLIER_OFFSET: usize = 16;

/// Decoded fixed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BifHeader {
    /// Format version.
    pub version: u32,
    /// Number of real frames in the index.
    pub image_count: u32,
    /// Milliseconds per raw timestamp unit, already normalized.
    pub timestamp_multiplier: u32,
}

impl BifHeader {
    /// Check the magic number and version, then decode the remaining fields.
    pub fn read(buf: &[u8]) -> Result<Self> {
        if buf.len() < MAGIC_NUMBER.len() || buf[..MAGIC_NUMBER.len()] != MAGIC_NUMBER {
            return Err(Error::InvalidMagic);
        }

        let version = read_u32_le(buf, VERSION_OFFSET)?;
        if version != SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let image_count = read_u32_le(buf, IMAGE_COUNT_OFFSET)?;
        let timestamp_multiplier = normalize_multiplier(read_u32_le(buf, MULTIPLIER_OFFSET)?);

        Ok(Self {
            version,
            image_count,
            timestamp_multiplier,
        })
    }

    /// Byte offset of the terminator entry.
    ///
    /// Computed in 64 bits so a hostile `image_count` cannot overflow on
    /// 32-bit targets.
    pub fn terminator_offset(&self) -> u64 {
        HEADER_SIZE as u64 + u64::from(self.image_count) * INDEX_ENTRY_SIZE as u64
    }

    /// Bytes needed to hold the header, the index and the terminator.
    pub fn index_end(&self) -> u64 {
        self.terminator_offset() + INDEX_ENTRY_SIZE as u64
    }
}

/// Treat a stored multiplier of 0 as one second per unit.
pub fn normalize_multiplier(raw: u32) -> u32 {
    if raw == 0 {
        DEFAULT_TIMESTAMP_MULTIPLIER
    } else {
        raw
    }
}

/// Read an unsigned little-endian 32-bit word at `offset`.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    let need = offset + 4;
    let bytes = buf.get(offset..need).ok_or(Error::BufferUnderflow {
        need,
        have: buf.len(),
    })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
