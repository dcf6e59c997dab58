//! Core types shared by the media and playback layers.
//!
//! All time values are milliseconds (i64).

pub mod time;

pub use time::{Time, ZERO};
