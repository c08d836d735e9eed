//! Trickplay - seek-bar thumbnails for video playback
//!
//! This library crate exposes the services and session types used by the
//! `trickplay` binary and by integration tests. BIF parsing itself lives in
//! the `trickplay-bif` crate and is re-exported here.

pub mod config;
pub mod playback;
pub mod service;

pub use trickplay_bif as bif;
