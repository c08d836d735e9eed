//! Server-rendered thumbnail URLs.
//!
//! The thumbnail server renders one JPEG per 10-second block, named by the
//! 1-based block number zero-padded to 8 digits.

use super::ThumbnailUrlError;

const BLOCK_SECS: f64 = 10.0;

/// URL of the thumbnail covering `second` of the video.
///
/// Trailing slashes on `base_url` are dropped before joining.
pub fn thumbnail_url_for_second(second: f64, base_url: &str) -> Result<String, ThumbnailUrlError> {
    if !second.is_finite() {
        return Err(ThumbnailUrlError::InvalidSecond(second));
    }
    if second < 0.0 {
        return Err(ThumbnailUrlError::NegativeSecond(second));
    }

    let base = base_url.trim_end_matches('/');
    if base.trim().is_empty() {
        return Err(ThumbnailUrlError::MissingBaseUrl);
    }

    let block = (second / BLOCK_SECS).floor() as u64 + 1;
    Ok(format!("{}/{:08}.jpg", base, block))
}
