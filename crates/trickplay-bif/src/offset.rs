//! Frame offset table entries.

/// Position of one frame inside a BIF buffer.
///
/// Entry `i` and entry `i + 1` together bound the bytes of frame `i`. The last
/// entry of a parsed table is the terminator: its position is `u64::MAX` so it
/// sorts after any real lookup, and its offset marks the end of the final frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameImageOffset {
    /// Playback position in milliseconds.
    pub position_millis: u64,
    /// Byte offset of the frame data from the start of the file.
    pub offset_bytes: u32,
}

impl FrameImageOffset {
    /// Create an entry for a real frame from its raw index timestamp.
    pub fn from_raw(raw_timestamp: u32, multiplier: u32, offset_bytes: u32) -> Self {
        Self {
            position_millis: raw_timestamp as u64 * multiplier as u64,
            offset_bytes,
        }
    }

    /// Create the synthetic end-of-data entry.
    pub fn terminator(offset_bytes: u32) -> Self {
        Self {
            position_millis: u64::MAX,
            offset_bytes,
        }
    }

    /// Whether this is the end-of-data entry.
    pub fn is_terminator(&self) -> bool {
        self.position_millis == u64::MAX
    }
}
