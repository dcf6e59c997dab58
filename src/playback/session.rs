//! Comparison session event loop.
//! One thread owns both media handles and services the poll timer and UI
//! commands from a single `select!`, so handle mutation is never concurrent.
//! Snapshots are published through a `watch` channel that always holds the
//! latest tick.

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;
use std::thread;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};
use crate::error::{Result, SyncError};
use crate::media::handle::MediaHandle;
use crate::playback::snapshot::PlaybackSnapshot;
use crate::playback::transport::{DisplayMode, TransportCommand, TransportFacade};

/// Message accepted by the session thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionMessage {
    Command(TransportCommand),
    Shutdown,
}

/// State owned by the session thread
pub struct ComparisonSession<P, S> {
    facade: TransportFacade<P, S>,
    messages: Receiver<SessionMessage>,
    snapshots: watch::Sender<PlaybackSnapshot>,
}

impl<P: MediaHandle, S: MediaHandle> ComparisonSession<P, S> {
    pub fn new(
        facade: TransportFacade<P, S>,
        messages: Receiver<SessionMessage>,
        snapshots: watch::Sender<PlaybackSnapshot>,
    ) -> Self {
        Self {
            facade,
            messages,
            snapshots,
        }
    }

    fn publish_tick(&mut self) {
        let snapshot = self.facade.tick();
        self.snapshots.send_replace(snapshot);
    }

    /// Service the timer and commands until shutdown or until every sender
    /// is dropped. The timer is released on return.
    pub fn run(mut self) -> TransportFacade<P, S> {
        let ticker = self.facade.controller().poller().ticker();
        let messages = self.messages.clone();
        info!(
            interval_ms = self.facade.controller().poller().interval().as_millis() as u64,
            "comparison session started"
        );
        self.publish_tick();

        loop {
            select! {
                recv(ticker) -> _ => self.publish_tick(),
                recv(messages) -> message => match message {
                    Ok(SessionMessage::Command(command)) => {
                        let outcome = self.facade.apply(command);
                        trace!(?command, ?outcome, "transport command");
                    }
                    Ok(SessionMessage::Shutdown) => {
                        debug!("shutdown requested");
                        break;
                    }
                    Err(_) => {
                        debug!("all session handles dropped");
                        break;
                    }
                },
            }
        }

        info!("comparison session stopped");
        self.facade
    }
}

/// UI-side handle to a running session.
///
/// Dropping the handle stops the session thread and waits for it.
pub struct SessionHandle {
    messages: Sender<SessionMessage>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SessionHandle {
    /// Move `facade` onto a dedicated session thread and start polling.
    pub fn spawn<P, S>(facade: TransportFacade<P, S>) -> Result<Self>
    where
        P: MediaHandle + Send + 'static,
        S: MediaHandle + Send + 'static,
    {
        let (message_tx, message_rx) = channel::unbounded();
        let initial = facade.controller().last_snapshot().clone();
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let session = ComparisonSession::new(facade, message_rx, snapshot_tx);

        let thread = thread::Builder::new()
            .name("courtsync-session".into())
            .spawn(move || {
                session.run();
            })?;

        Ok(Self {
            messages: message_tx,
            snapshots: snapshot_rx,
            thread: Some(thread),
        })
    }

    pub fn send(&self, command: TransportCommand) -> Result<()> {
        self.messages
            .send(SessionMessage::Command(command))
            .map_err(|_| SyncError::SessionClosed)
    }

    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(TransportCommand::TogglePlayPause)
    }

    pub fn replay(&self) -> Result<()> {
        self.send(TransportCommand::Replay)
    }

    pub fn nudge(&self, delta_seconds: f64) -> Result<()> {
        self.send(TransportCommand::Nudge(delta_seconds))
    }

    pub fn seek_primary(&self, ratio: f64) -> Result<()> {
        self.send(TransportCommand::SeekPrimary(ratio))
    }

    pub fn seek_secondary(&self, ratio: f64) -> Result<()> {
        self.send(TransportCommand::SeekSecondary(ratio))
    }

    pub fn set_blend_opacity(&self, value: f32) -> Result<()> {
        self.send(TransportCommand::SetBlendOpacity(value))
    }

    pub fn set_display_mode(&self, mode: DisplayMode) -> Result<()> {
        self.send(TransportCommand::SetDisplayMode(mode))
    }

    /// Subscribe to the snapshot stream.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop the session thread and wait for it to exit.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // Fails only if the thread already exited.
        let _ = self.messages.send(SessionMessage::Shutdown);
        thread
            .join()
            .map_err(|_| SyncError::Thread("session thread panicked".into()))
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "comparison session did not stop cleanly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use crate::config::SyncConfig;
    use crate::core::time::Time;
    use crate::media::sim::SimulatedTrack;
    use crate::playback::state::SyncState;

    fn fast_config() -> SyncConfig {
        SyncConfig {
            poll_interval_ms: 5,
            ..SyncConfig::default()
        }
    }

    /// Source whose reads panic, taking the session thread down with it.
    struct FaultyTrack;

    impl MediaHandle for FaultyTrack {
        fn play(&mut self) {}

        fn pause(&mut self) {}

        fn seek(&mut self, _target: Time) {}

        fn current_time(&self) -> Time {
            panic!("media source crashed")
        }

        fn duration(&self) -> Time {
            panic!("media source crashed")
        }
    }

    fn faulty_facade() -> TransportFacade<FaultyTrack, SimulatedTrack> {
        TransportFacade::new(FaultyTrack, SimulatedTrack::new(1_000), &fast_config())
    }

    fn simulated_facade(
        primary: SimulatedTrack,
        secondary: SimulatedTrack,
    ) -> TransportFacade<SimulatedTrack, SimulatedTrack> {
        TransportFacade::new(primary, secondary, &fast_config())
    }

    fn wait_for(
        handle: &SessionHandle,
        predicate: impl Fn(&PlaybackSnapshot) -> bool,
    ) -> PlaybackSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let snapshot = handle.latest();
            if predicate(&snapshot) || Instant::now() > deadline {
                return snapshot;
            }
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_run_returns_facade_when_senders_drop() {
        let facade = simulated_facade(SimulatedTrack::new(1_000), SimulatedTrack::new(1_000));
        let (message_tx, message_rx) = channel::unbounded();
        let initial = facade.controller().last_snapshot().clone();
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        message_tx.send(SessionMessage::Command(TransportCommand::Nudge(0.5))).unwrap();
        drop(message_tx);

        let facade = ComparisonSession::new(facade, message_rx, snapshot_tx).run();
        assert!(snapshot_rx.borrow().sequence >= 1);
        assert_eq!(facade.controller().state(), SyncState::Paused);
        assert_eq!(facade.controller().primary().current_time(), 500);
    }

    #[test]
    fn test_spawned_session_publishes_snapshots() {
        let facade = simulated_facade(SimulatedTrack::new(10_000), SimulatedTrack::new(8_000));
        let handle = SessionHandle::spawn(facade).unwrap();

        let ready = wait_for(&handle, |s| s.state == SyncState::Paused);
        assert_eq!(ready.state, SyncState::Paused);
        assert_eq!(ready.primary.duration, 10_000);

        handle.toggle_play_pause().unwrap();
        let playing = wait_for(&handle, |s| s.state == SyncState::Playing);
        assert!(playing.intent.playing);
        assert!(playing.sequence > ready.sequence);

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_subscribers_see_session_close() {
        let facade = simulated_facade(SimulatedTrack::unavailable(), SimulatedTrack::unavailable());
        let handle = SessionHandle::spawn(facade).unwrap();
        let subscriber = handle.subscribe();

        drop(handle);
        assert!(subscriber.has_changed().is_err());
    }

    #[test]
    fn test_shutdown_reports_panicked_session_thread() {
        let handle = SessionHandle::spawn(faulty_facade()).unwrap();

        let err = handle.shutdown().unwrap_err();
        assert!(matches!(err, SyncError::Thread(_)));
    }

    #[test]
    fn test_drop_survives_panicked_session_thread() {
        let handle = SessionHandle::spawn(faulty_facade()).unwrap();
        let subscriber = handle.subscribe();

        drop(handle);
        assert!(subscriber.has_changed().is_err());
    }
}
