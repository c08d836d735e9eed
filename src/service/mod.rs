//! Trickplay thumbnail services.
//!
//! Two independent strategies feed the seek bar:
//!
//! - [`BifService`] downloads a BIF file and parses it into a
//!   [`FrameImageSource`](trickplay_bif::FrameImageSource)
//! - [`thumbnail_url_for_second`] composes the URL of a server-rendered
//!   thumbnail when the title only carries a thumbnail base URL

mod bif;
mod error;
mod thumbnail;

pub use bif::BifService;
pub use error::{ServiceError, ThumbnailUrlError};
pub use thumbnail::thumbnail_url_for_second;
