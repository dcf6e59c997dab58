//! Fixed-interval sampler for the two compared tracks.
//!
//! The poller only reads. It turns two independently updating handles into
//! one consistent sample per tick and flags end-of-stream, leaving every
//! transport decision to the sync controller.

use crossbeam::channel::{self, Receiver};
use std::time::{Duration, Instant};
use crate::config::SyncConfig;
use crate::core::time::Time;
use crate::media::handle::MediaHandle;
use crate::playback::snapshot::{MediaTrackState, PollSample};

pub struct PlaybackPoller {
    interval: Duration,
    ends_epsilon: Time,
    sequence: u64,
}

impl PlaybackPoller {
    pub fn new(interval: Duration, ends_epsilon: Time) -> Self {
        Self {
            interval,
            ends_epsilon,
            sequence: 0,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.poll_interval(), config.ends_epsilon_ms)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ends_epsilon(&self) -> Time {
        self.ends_epsilon
    }

    /// Number of samples taken so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Read both tracks, primary first.
    pub fn sample<P, S>(&mut self, primary: &P, secondary: &S) -> PollSample
    where
        P: MediaHandle + ?Sized,
        S: MediaHandle + ?Sized,
    {
        self.sequence += 1;
        let primary = MediaTrackState::read(primary, self.ends_epsilon);
        let secondary = MediaTrackState::read(secondary, self.ends_epsilon);

        PollSample {
            sequence: self.sequence,
            taken_at: Instant::now(),
            primary,
            secondary,
        }
    }

    /// Evaluate the end-of-stream rule against a handle's current state
    /// without counting it as a tick.
    pub fn is_ended<H: MediaHandle + ?Sized>(&self, handle: &H) -> bool {
        MediaTrackState::read(handle, self.ends_epsilon).ended
    }

    /// Repeating timer firing once per interval. Dropping the receiver
    /// cancels it.
    pub fn ticker(&self) -> Receiver<Instant> {
        channel::tick(self.interval)
    }
}

impl Default for PlaybackPoller {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::sim::SimulatedTrack;

    #[test]
    fn test_default_tuning() {
        let poller = PlaybackPoller::default();
        assert_eq!(poller.interval(), Duration::from_millis(500));
        assert_eq!(poller.ends_epsilon(), 250);
    }

    #[test]
    fn test_sample_reads_both_tracks() {
        let mut poller = PlaybackPoller::default();
        let mut primary = SimulatedTrack::new(60_000);
        let secondary = SimulatedTrack::loading(45_000);
        primary.seek(12_000);

        let sample = poller.sample(&primary, &secondary);
        assert_eq!(sample.sequence, 1);
        assert_eq!(sample.primary.position, 12_000);
        assert!(sample.primary.is_ready);
        assert!(!sample.secondary.is_ready);
        assert!(!sample.both_ready());

        let next = poller.sample(&primary, &secondary);
        assert_eq!(next.sequence, 2);
        assert!(next.taken_at >= sample.taken_at);
    }

    #[test]
    fn test_end_flags_are_per_track() {
        let mut poller = PlaybackPoller::new(Duration::from_millis(100), 250);
        let mut primary = SimulatedTrack::new(60_000);
        let mut secondary = SimulatedTrack::new(45_000);
        primary.seek(59_900);
        secondary.seek(20_000);

        let sample = poller.sample(&primary, &secondary);
        assert!(sample.primary.ended);
        assert!(!sample.secondary.ended);
        assert!(sample.any_ended());
        assert!(poller.is_ended(&primary));
        assert_eq!(poller.sequence(), 1);
    }

    #[test]
    fn test_ticker_fires() {
        let poller = PlaybackPoller::new(Duration::from_millis(5), 250);
        let ticker = poller.ticker();
        assert!(ticker.recv_timeout(Duration::from_secs(1)).is_ok());
    }
}
