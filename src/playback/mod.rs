//! Playback-session ownership of trickplay resources.
//!
//! A [`PlaybackSession`] holds the frame image source for exactly one title
//! while the player is on screen, resolves seek previews through the
//! fallback chain, and releases the cache when playback ends.

mod preview;
mod session;

pub use preview::{SeekPreview, TRANSPARENT_PLACEHOLDER};
pub use session::{PlaybackSession, TitleTrickplay};
