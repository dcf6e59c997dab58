//! Uniform control surface over one playable video source.

use std::fmt;
use crate::core::time::Time;

/// Which side of the comparison a track sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackRole {
    /// Base layer (e.g. the coach recording)
    Primary,
    /// Overlay / second pane (e.g. the learner recording)
    Secondary,
}

impl fmt::Display for TrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackRole::Primary => write!(f, "primary"),
            TrackRole::Secondary => write!(f, "secondary"),
        }
    }
}

/// A single controllable media source.
///
/// Transport calls are fire-and-forget: they never block and never fail.
/// A source that cannot be loaded simply never becomes ready. Reads report
/// the last-known source state and may lag a `seek` issued in the same tick.
///
/// Implementations must clamp `seek` targets to `[0, duration]` and treat
/// `seek` on a source that is not ready as a no-op.
#[cfg_attr(test, mockall::automock)]
pub trait MediaHandle {
    /// Request playback start. No-op if already playing.
    fn play(&mut self);

    /// Request playback stop. No-op if already paused.
    fn pause(&mut self);

    /// Request a jump to `target` milliseconds.
    fn seek(&mut self, target: Time);

    /// Last-known playback position in milliseconds.
    fn current_time(&self) -> Time;

    /// Source duration in milliseconds, 0 until metadata is known.
    fn duration(&self) -> Time;

    /// True once the source has reported a non-zero duration.
    fn is_ready(&self) -> bool {
        self.duration() > 0
    }
}

impl<H: MediaHandle + ?Sized> MediaHandle for Box<H> {
    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek(&mut self, target: Time) {
        (**self).seek(target)
    }

    fn current_time(&self) -> Time {
        (**self).current_time()
    }

    fn duration(&self) -> Time {
        (**self).duration()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
