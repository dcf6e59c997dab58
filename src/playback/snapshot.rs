//! Per-tick view of both tracks.

use std::time::Instant;
use crate::core::time::{Time, ZERO};
use crate::media::handle::MediaHandle;
use crate::playback::state::SyncState;
use crate::playback::transport::TransportIntent;

/// End-of-stream rule: a ready track is ended once it is within `epsilon`
/// of its duration. Positions past the duration count as ended.
#[inline]
pub fn is_at_end(position: Time, duration: Time, epsilon: Time) -> bool {
    duration > ZERO && duration - position <= epsilon
}

/// State of one track as read on a poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaTrackState {
    /// Playback position in milliseconds
    pub position: Time,
    /// Duration in milliseconds, 0 until the source reports metadata
    pub duration: Time,
    pub is_ready: bool,
    /// Poller's end-of-stream verdict
    pub ended: bool,
}

impl MediaTrackState {
    /// Read a handle's last-known state.
    pub fn read<H: MediaHandle + ?Sized>(handle: &H, ends_epsilon: Time) -> Self {
        let position = handle.current_time().max(ZERO);
        let duration = handle.duration().max(ZERO);
        let is_ready = handle.is_ready();

        Self {
            position,
            duration,
            is_ready,
            ended: is_ready && is_at_end(position, duration, ends_epsilon),
        }
    }

    /// Scrub-bar fill in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration <= ZERO {
            return 0.0;
        }
        (self.position as f64 / self.duration as f64).clamp(0.0, 1.0)
    }
}

/// One poll tick's reading of both tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSample {
    pub sequence: u64,
    pub taken_at: Instant,
    pub primary: MediaTrackState,
    pub secondary: MediaTrackState,
}

impl PollSample {
    pub fn both_ready(&self) -> bool {
        self.primary.is_ready && self.secondary.is_ready
    }

    /// Either track finishing ends joint playback.
    pub fn any_ended(&self) -> bool {
        self.primary.ended || self.secondary.ended
    }
}

/// Consolidated state published to the UI once per tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    /// Monotonic tick counter, 0 before the first tick
    pub sequence: u64,
    pub taken_at: Instant,
    pub primary: MediaTrackState,
    pub secondary: MediaTrackState,
    /// Controller state after this tick was evaluated
    pub state: SyncState,
    pub intent: TransportIntent,
}

impl PlaybackSnapshot {
    /// Snapshot describing a session that has not ticked yet.
    pub fn initial(intent: TransportIntent) -> Self {
        Self {
            sequence: 0,
            taken_at: Instant::now(),
            primary: MediaTrackState::default(),
            secondary: MediaTrackState::default(),
            state: SyncState::Idle,
            intent,
        }
    }

    pub fn from_sample(sample: PollSample, state: SyncState, intent: TransportIntent) -> Self {
        Self {
            sequence: sample.sequence,
            taken_at: sample.taken_at,
            primary: sample.primary,
            secondary: sample.secondary,
            state,
            intent,
        }
    }

    pub fn both_ready(&self) -> bool {
        self.primary.is_ready && self.secondary.is_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::sim::SimulatedTrack;

    #[test]
    fn test_is_at_end() {
        assert!(is_at_end(59_800, 60_000, 250));
        assert!(is_at_end(60_000, 60_000, 250));
        assert!(is_at_end(60_400, 60_000, 250));
        assert!(!is_at_end(59_700, 60_000, 250));
        assert!(!is_at_end(0, 0, 250));
    }

    #[test]
    fn test_read_unready_track() {
        let track = SimulatedTrack::loading(10_000);
        let state = MediaTrackState::read(&track, 250);

        assert_eq!(state, MediaTrackState::default());
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_read_tolerates_overshoot() {
        let mut track = SimulatedTrack::new(10_000);
        track.report_position(10_120);
        let state = MediaTrackState::read(&track, 250);

        assert!(state.is_ready);
        assert!(state.ended);
        assert_eq!(state.progress(), 1.0);
    }
}
