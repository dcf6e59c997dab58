//! Sync controller state machine.

use std::fmt;

/// Joint playback state of the two compared tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// At least one source has not reported its duration yet
    #[default]
    Idle,
    /// Both sources ready, transport stopped
    Paused,
    /// Both sources asked to play
    Playing,
    /// One of the tracks reached its end while playing
    Ended,
}

impl SyncState {
    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, SyncState::Playing)
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        matches!(self, SyncState::Paused)
    }

    /// Check if ended
    pub fn is_ended(&self) -> bool {
        matches!(self, SyncState::Ended)
    }

    /// Check if both sources have become ready at some point
    pub fn is_ready(&self) -> bool {
        !matches!(self, SyncState::Idle)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncState::Idle => "idle",
            SyncState::Paused => "paused",
            SyncState::Playing => "playing",
            SyncState::Ended => "ended",
        };
        f.write_str(name)
    }
}
