//! Dual-track synchronization controller.
//!
//! Owns the transport intent and drives two media handles through the
//! `Idle → Paused → Playing → Ended` state machine. Alignment between the
//! tracks is applied only when playback starts and when the primary is
//! scrubbed in overlay mode; drift during playback is left alone.
//!
//! Every operation is infallible. Requests that cannot apply (seeking a track
//! that is not ready, toggling before both sources load) are logged and
//! reported as `TransportOutcome::Ignored`.

use tracing::{debug, info, trace};
use crate::config::SyncConfig;
use crate::core::time::{self, Time, ZERO};
use crate::media::handle::{MediaHandle, TrackRole};
use crate::playback::poller::PlaybackPoller;
use crate::playback::snapshot::PlaybackSnapshot;
use crate::playback::state::SyncState;
use crate::playback::transport::{DisplayMode, TransportIntent, TransportOutcome};

/// Seek `handle` to `target`, clamped to its own duration.
fn seek_guarded<H: MediaHandle + ?Sized>(
    role: TrackRole,
    handle: &mut H,
    target: Time,
) -> TransportOutcome {
    if !handle.is_ready() {
        debug!(track = %role, target_ms = target, "ignoring seek on track that is not ready");
        return TransportOutcome::Ignored;
    }
    let clamped = time::clamp_to_duration(target, handle.duration());
    trace!(track = %role, target_ms = target, clamped, "seek");
    handle.seek(clamped);
    TransportOutcome::Applied
}

pub struct SyncController<P, S> {
    primary: P,
    secondary: S,
    poller: PlaybackPoller,
    state: SyncState,
    intent: TransportIntent,
    last_snapshot: PlaybackSnapshot,
}

impl<P: MediaHandle, S: MediaHandle> SyncController<P, S> {
    /// Create a controller over two handles. Both tracks start paused.
    pub fn new(primary: P, secondary: S, config: &SyncConfig) -> Self {
        let intent = TransportIntent::new(config.initial_blend_opacity, config.display_mode);
        Self {
            primary,
            secondary,
            poller: PlaybackPoller::from_config(config),
            state: SyncState::Idle,
            intent,
            last_snapshot: PlaybackSnapshot::initial(intent),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn intent(&self) -> TransportIntent {
        self.intent
    }

    pub fn poller(&self) -> &PlaybackPoller {
        &self.poller
    }

    /// Snapshot produced by the most recent tick
    pub fn last_snapshot(&self) -> &PlaybackSnapshot {
        &self.last_snapshot
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    /// Direct access to the primary source, e.g. to drive a simulated clock.
    pub fn primary_mut(&mut self) -> &mut P {
        &mut self.primary
    }

    pub fn secondary_mut(&mut self) -> &mut S {
        &mut self.secondary
    }

    fn transition(&mut self, next: SyncState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "sync state changed");
            self.state = next;
        }
    }

    /// Sample both tracks and apply the automatic transitions.
    pub fn tick(&mut self) -> PlaybackSnapshot {
        let sample = self.poller.sample(&self.primary, &self.secondary);
        trace!(
            sequence = sample.sequence,
            primary = sample.primary.position,
            secondary = sample.secondary.position,
            "poll"
        );

        match self.state {
            SyncState::Idle if sample.both_ready() => {
                self.transition(SyncState::Paused);
            }
            SyncState::Playing if sample.any_ended() => {
                info!(
                    primary_ended = sample.primary.ended,
                    secondary_ended = sample.secondary.ended,
                    "end of stream reached, pausing both tracks"
                );
                self.primary.pause();
                self.secondary.pause();
                self.intent.playing = false;
                self.transition(SyncState::Ended);
            }
            _ => {}
        }

        let snapshot = PlaybackSnapshot::from_sample(sample, self.state, self.intent);
        self.last_snapshot = snapshot.clone();
        snapshot
    }

    /// Pause if playing, otherwise resume from where each track was left.
    pub fn toggle_play_pause(&mut self) -> TransportOutcome {
        match self.state {
            SyncState::Idle => {
                debug!("ignoring play/pause before both tracks are ready");
                TransportOutcome::Ignored
            }
            SyncState::Playing => {
                self.pause();
                TransportOutcome::Applied
            }
            SyncState::Paused | SyncState::Ended => {
                self.start_playback(false);
                TransportOutcome::Applied
            }
        }
    }

    /// Rewind both tracks and play from the start.
    pub fn replay(&mut self) -> TransportOutcome {
        if !self.state.is_ready() {
            debug!("ignoring replay before both tracks are ready");
            return TransportOutcome::Ignored;
        }
        self.start_playback(true);
        TransportOutcome::Applied
    }

    fn pause(&mut self) {
        self.primary.pause();
        self.secondary.pause();
        self.intent.playing = false;
        self.transition(SyncState::Paused);
    }

    fn start_playback(&mut self, rewind_all: bool) {
        // Evaluated on a fresh read, primary first.
        let rewind_primary = rewind_all || self.poller.is_ended(&self.primary);
        let rewind_secondary = rewind_all || self.poller.is_ended(&self.secondary);

        if rewind_primary {
            debug!(track = %TrackRole::Primary, "rewinding before playback");
            seek_guarded(TrackRole::Primary, &mut self.primary, ZERO);
        }
        if rewind_secondary {
            debug!(track = %TrackRole::Secondary, "rewinding before playback");
            seek_guarded(TrackRole::Secondary, &mut self.secondary, ZERO);
        }

        self.primary.play();
        self.secondary.play();

        if self.intent.display_mode == DisplayMode::Overlay {
            // A rewind may not be visible through current_time() yet.
            let anchor = if rewind_primary { ZERO } else { self.primary.current_time() };
            debug!(anchor, "aligning overlay to primary");
            seek_guarded(TrackRole::Secondary, &mut self.secondary, anchor);
        }

        self.intent.playing = true;
        self.transition(SyncState::Playing);
    }

    /// Move every ready track by `delta`, each clamped to its own duration.
    pub fn nudge_by(&mut self, delta: Time) -> TransportOutcome {
        if !self.state.is_ready() {
            debug!(delta, "ignoring nudge before both tracks are ready");
            return TransportOutcome::Ignored;
        }

        let primary_target = self.primary.current_time().saturating_add(delta);
        let secondary_target = self.secondary.current_time().saturating_add(delta);
        seek_guarded(TrackRole::Primary, &mut self.primary, primary_target);
        seek_guarded(TrackRole::Secondary, &mut self.secondary, secondary_target);

        if self.state == SyncState::Ended {
            self.transition(SyncState::Paused);
        }
        TransportOutcome::Applied
    }

    /// Absolute seek on one track.
    ///
    /// Secondary seeks never touch the primary. A primary seek in overlay
    /// mode carries the overlay along to the same position.
    pub fn seek_track(&mut self, role: TrackRole, target: Time) -> TransportOutcome {
        match role {
            TrackRole::Secondary => seek_guarded(role, &mut self.secondary, target),
            TrackRole::Primary => {
                let outcome = seek_guarded(role, &mut self.primary, target);
                if outcome.is_applied() && self.intent.display_mode == DisplayMode::Overlay {
                    let anchor = time::clamp_to_duration(target, self.primary.duration());
                    seek_guarded(TrackRole::Secondary, &mut self.secondary, anchor);
                }
                outcome
            }
        }
    }

    pub fn set_blend_opacity(&mut self, value: f32) -> TransportOutcome {
        if !value.is_finite() {
            debug!(value, "ignoring non-finite blend opacity");
            return TransportOutcome::Ignored;
        }
        self.intent.blend_opacity = value.clamp(0.0, 1.0);
        TransportOutcome::Applied
    }

    /// Switch display mode. Neither track moves; alignment waits for the
    /// next play or primary seek.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> TransportOutcome {
        if self.intent.display_mode != mode {
            info!(?mode, "display mode changed");
            self.intent.display_mode = mode;
        }
        TransportOutcome::Applied
    }
}
