//! Transport facade bound by the comparison UI.
//!
//! Converts UI-relative inputs (slider ratios, nudge seconds) into absolute
//! positions using each track's duration at call time, then hands them to
//! the sync controller.

use serde::{Deserialize, Serialize};
use crate::config::SyncConfig;
use crate::core::time::{self, Time};
use crate::media::handle::{MediaHandle, TrackRole};
use crate::playback::snapshot::PlaybackSnapshot;
use crate::playback::sync::SyncController;

/// How the two tracks are laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Secondary rendered as a translucent layer over the primary
    Overlay,
    /// Tracks side by side, scrubbed independently
    #[default]
    Split,
}

/// User-expressed transport state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportIntent {
    /// What the user asked for; a track may lag behind while seeking or buffering
    pub playing: bool,
    /// Overlay weight in `[0, 1]`
    pub blend_opacity: f32,
    pub display_mode: DisplayMode,
}

impl TransportIntent {
    pub fn new(blend_opacity: f32, display_mode: DisplayMode) -> Self {
        Self {
            playing: false,
            blend_opacity: blend_opacity.clamp(0.0, 1.0),
            display_mode,
        }
    }
}

impl Default for TransportIntent {
    fn default() -> Self {
        Self::new(0.5, DisplayMode::default())
    }
}

/// Result of a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOutcome {
    Applied,
    /// Request had no effect (source not ready, invalid input)
    Ignored,
}

impl TransportOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransportOutcome::Applied)
    }
}

/// A UI gesture, as sent across the session channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    TogglePlayPause,
    Replay,
    /// Relative jump in seconds, applied to both tracks
    Nudge(f64),
    /// Slider ratio in `[0, 1]`
    SeekPrimary(f64),
    SeekSecondary(f64),
    SetBlendOpacity(f32),
    SetDisplayMode(DisplayMode),
}

/// Format a position for the time readout next to a scrub bar.
pub fn time_readout(position: Time) -> String {
    time::format_clock(position)
}

pub struct TransportFacade<P, S> {
    controller: SyncController<P, S>,
    nudge_step: f64,
}

impl<P: MediaHandle, S: MediaHandle> TransportFacade<P, S> {
    pub fn new(primary: P, secondary: S, config: &SyncConfig) -> Self {
        Self {
            controller: SyncController::new(primary, secondary, config),
            nudge_step: config.nudge_step_secs,
        }
    }

    pub fn controller(&self) -> &SyncController<P, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SyncController<P, S> {
        &mut self.controller
    }

    /// Run one poll tick.
    pub fn tick(&mut self) -> PlaybackSnapshot {
        self.controller.tick()
    }

    pub fn toggle_play_pause(&mut self) -> TransportOutcome {
        self.controller.toggle_play_pause()
    }

    pub fn replay(&mut self) -> TransportOutcome {
        self.controller.replay()
    }

    /// Shift both tracks by `delta_seconds` (negative rewinds).
    pub fn nudge(&mut self, delta_seconds: f64) -> TransportOutcome {
        if !delta_seconds.is_finite() {
            return TransportOutcome::Ignored;
        }
        self.controller.nudge_by(time::from_seconds(delta_seconds))
    }

    pub fn nudge_forward(&mut self) -> TransportOutcome {
        self.nudge(self.nudge_step)
    }

    pub fn nudge_back(&mut self) -> TransportOutcome {
        self.nudge(-self.nudge_step)
    }

    pub fn seek_primary(&mut self, ratio: f64) -> TransportOutcome {
        let target = time::ratio_to_position(ratio, self.controller.primary().duration());
        self.controller.seek_track(TrackRole::Primary, target)
    }

    pub fn seek_secondary(&mut self, ratio: f64) -> TransportOutcome {
        let target = time::ratio_to_position(ratio, self.controller.secondary().duration());
        self.controller.seek_track(TrackRole::Secondary, target)
    }

    pub fn set_blend_opacity(&mut self, value: f32) -> TransportOutcome {
        self.controller.set_blend_opacity(value)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> TransportOutcome {
        self.controller.set_display_mode(mode)
    }

    /// Dispatch a command received from the UI.
    pub fn apply(&mut self, command: TransportCommand) -> TransportOutcome {
        match command {
            TransportCommand::TogglePlayPause => self.toggle_play_pause(),
            TransportCommand::Replay => self.replay(),
            TransportCommand::Nudge(seconds) => self.nudge(seconds),
            TransportCommand::SeekPrimary(ratio) => self.seek_primary(ratio),
            TransportCommand::SeekSecondary(ratio) => self.seek_secondary(ratio),
            TransportCommand::SetBlendOpacity(value) => self.set_blend_opacity(value),
            TransportCommand::SetDisplayMode(mode) => self.set_display_mode(mode),
        }
    }
}
