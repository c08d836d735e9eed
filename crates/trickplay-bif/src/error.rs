//! Error types for trickplay-bif.

use thiserror::Error;

/// Result type for trickplay-bif operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for trickplay-bif operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The first eight bytes are not the BIF magic number.
    #[error("Invalid BIF magic number")]
    InvalidMagic,

    /// The header declares a format version this crate cannot read.
    #[error("Unsupported BIF version: {0}")]
    UnsupportedVersion(u32),

    /// Buffer too small for operation.
    #[error("Buffer underflow: need {need} bytes, have {have}")]
    BufferUnderflow { need: usize, have: usize },

    /// Serialized output would not be addressable with 32-bit offsets.
    #[error("BIF too large: {0} bytes exceeds 32-bit offset range")]
    TooLarge(u64),
}
