//! Demo entry point: runs a comparison session over two wall-clock sources
//! and prints the snapshot stream until either track ends.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use courtsync::media::ClockedTrack;
use courtsync::playback::{time_readout, MediaTrackState, TransportFacade};
use courtsync::{logging, DisplayMode, SessionHandle, SyncConfig, SyncState};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Overlay,
    Split,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Overlay => DisplayMode::Overlay,
            ModeArg::Split => DisplayMode::Split,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Synchronized dual-video playback demo", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Primary (coach) track duration in milliseconds
    #[arg(long, default_value_t = 12_000)]
    primary_ms: i64,

    /// Secondary (learner) track duration in milliseconds
    #[arg(long, default_value_t = 9_000)]
    secondary_ms: i64,

    /// Time both sources take to report their metadata
    #[arg(long, default_value_t = 300)]
    load_delay_ms: u64,

    /// Override the poll interval from the configuration
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Display mode; defaults to the configured mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Scrub the secondary track to this ratio once playback starts
    #[arg(long)]
    seek_secondary: Option<f64>,
}

fn describe(track: &MediaTrackState) -> String {
    format!("{}/{}", time_readout(track.position), time_readout(track.duration))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };
    if let Some(poll_ms) = args.poll_ms {
        config.poll_interval_ms = poll_ms;
    }
    if let Some(mode) = args.mode {
        config.display_mode = mode.into();
    }
    config.validate()?;

    let load_delay = Duration::from_millis(args.load_delay_ms);
    let facade = TransportFacade::new(
        ClockedTrack::new(args.primary_ms, load_delay),
        ClockedTrack::new(args.secondary_ms, load_delay),
        &config,
    );
    let session = SessionHandle::spawn(facade)?;
    let mut snapshots = session.subscribe();

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(async {
        let mut started = false;
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            info!(
                state = %snapshot.state,
                primary = %describe(&snapshot.primary),
                secondary = %describe(&snapshot.secondary),
                "tick {}",
                snapshot.sequence
            );

            match snapshot.state {
                SyncState::Paused if !started => {
                    started = true;
                    session.toggle_play_pause()?;
                    if let Some(ratio) = args.seek_secondary {
                        session.seek_secondary(ratio)?;
                    }
                }
                SyncState::Ended => break,
                _ => {}
            }
        }
        anyhow::Ok(())
    })?;

    session.shutdown()?;
    Ok(())
}
