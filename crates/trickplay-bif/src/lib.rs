//! Trickplay-BIF: parsing and lookup for BIF seek-thumbnail containers.
//!
//! A BIF (Binary Index Frame) file packs a sequence of JPEG thumbnails behind a
//! fixed 64-byte header and a little-endian index of `(timestamp, offset)`
//! pairs. Seek bars use it to show a preview image while the viewer scrubs.
//!
//! # Modules
//!
//! - `format` - Container constants and the decoded header
//! - `offset` - The frame offset table entry type
//! - `parser` - Validating parser producing a [`BifFrameImageSource`]
//! - `source` - The [`FrameImageSource`] contract and its BIF-backed cache
//! - `writer` - Builder that serializes frames back into a BIF container
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use trickplay_bif::{BifParser, BifWriter, FrameImageSource};
//!
//! let data = BifWriter::new()
//!     .frame(0, vec![0xFF, 0xD8, 0xFF, 0xD9])
//!     .frame(10, vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9])
//!     .finish()
//!     .unwrap();
//!
//! let source = BifParser::parse(Bytes::from(data)).expect("valid BIF");
//! let uri = source.base64_image(0).unwrap();
//! assert!(uri.starts_with("data:image/jpeg;base64,"));
//! ```

pub mod error;
pub mod format;
pub mod offset;
pub mod parser;
pub mod source;
pub mod writer;

pub use error::{Error, Result};
pub use format::BifHeader;
pub use offset::FrameImageOffset;
pub use parser::{BifParser, ParsedIndex};
pub use source::{BifFrameImageSource, FrameImageSource, JPEG_DATA_URI_PREFIX};
pub use writer::BifWriter;
