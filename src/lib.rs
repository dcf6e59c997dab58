//! courtsync - synchronized dual-video playback for technique comparison.
//!
//! Two media sources (a primary "coach" recording and a secondary "learner"
//! recording) are sampled on a fixed interval and driven by one sync
//! controller. The transport facade is what a comparison screen binds its
//! play/pause, nudge, scrub and opacity controls to.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod media;
pub mod playback;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use media::{MediaHandle, TrackRole};
pub use playback::{
    DisplayMode, PlaybackSnapshot, SessionHandle, SyncController, SyncState, TransportFacade,
};
