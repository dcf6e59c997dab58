//! In-process media sources.
//!
//! `SimulatedTrack` advances only when told to, which makes controller
//! behaviour reproducible tick by tick. `ClockedTrack` follows the wall clock
//! and is what the demo binary drives.

use std::time::{Duration, Instant};
use crate::core::time::{self, Time, ZERO};
use crate::media::handle::MediaHandle;

/// A transport call received by a `SimulatedTrack`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    Play,
    Pause,
    Seek(Time),
}

/// Deterministic media source with a manual clock
#[derive(Debug, Clone)]
pub struct SimulatedTrack {
    position: Time,
    /// Duration the source will report once metadata is loaded
    media_duration: Time,
    loaded: bool,
    playing: bool,
    calls: Vec<TransportCall>,
}

impl SimulatedTrack {
    /// A source whose metadata is already loaded.
    pub fn new(duration: Time) -> Self {
        Self {
            position: ZERO,
            media_duration: duration.max(ZERO),
            loaded: true,
            playing: false,
            calls: Vec::new(),
        }
    }

    /// A source that reports zero duration until `finish_loading` is called.
    pub fn loading(duration: Time) -> Self {
        Self {
            loaded: false,
            ..Self::new(duration)
        }
    }

    /// A source that never becomes ready.
    pub fn unavailable() -> Self {
        Self::loading(ZERO)
    }

    /// Reveal the source's metadata.
    pub fn finish_loading(&mut self) {
        self.loaded = true;
    }

    /// Advance the playback clock by `delta` if the source is playing.
    /// The position stops at the end of the media.
    pub fn advance(&mut self, delta: Time) {
        if self.playing && self.is_ready() {
            self.position = (self.position + delta.max(ZERO)).min(self.media_duration);
        }
    }

    /// Overwrite the reported position without clamping, the way a real
    /// player can briefly report a timestamp past its duration.
    pub fn report_position(&mut self, position: Time) {
        self.position = position;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Every transport call received so far, including ignored ones
    pub fn calls(&self) -> &[TransportCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl MediaHandle for SimulatedTrack {
    fn play(&mut self) {
        self.calls.push(TransportCall::Play);
        if self.is_ready() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.calls.push(TransportCall::Pause);
        self.playing = false;
    }

    fn seek(&mut self, target: Time) {
        self.calls.push(TransportCall::Seek(target));
        if self.is_ready() {
            self.position = time::clamp_to_duration(target, self.media_duration);
        }
    }

    fn current_time(&self) -> Time {
        if self.loaded { self.position } else { ZERO }
    }

    fn duration(&self) -> Time {
        if self.loaded { self.media_duration } else { ZERO }
    }
}

/// Media source whose position follows the wall clock while playing
#[derive(Debug, Clone)]
pub struct ClockedTrack {
    media_duration: Time,
    created: Instant,
    load_delay: Duration,
    /// Position at the last transport change
    anchor: Time,
    playing_since: Option<Instant>,
}

impl ClockedTrack {
    /// Create a source that reports its metadata after `load_delay`.
    pub fn new(duration: Time, load_delay: Duration) -> Self {
        Self {
            media_duration: duration.max(ZERO),
            created: Instant::now(),
            load_delay,
            anchor: ZERO,
            playing_since: None,
        }
    }

    fn loaded(&self) -> bool {
        self.created.elapsed() >= self.load_delay
    }
}

impl MediaHandle for ClockedTrack {
    fn play(&mut self) {
        if self.playing_since.is_none() && self.loaded() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.anchor = self.current_time();
        self.playing_since = None;
    }

    fn seek(&mut self, target: Time) {
        if !self.loaded() {
            return;
        }
        self.anchor = time::clamp_to_duration(target, self.media_duration);
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn current_time(&self) -> Time {
        match self.playing_since {
            Some(since) => {
                let elapsed = since.elapsed().as_millis() as Time;
                (self.anchor + elapsed).min(self.media_duration)
            }
            None => self.anchor,
        }
    }

    fn duration(&self) -> Time {
        if self.loaded() { self.media_duration } else { ZERO }
    }
}
