//! Tracing subscriber setup for binaries embedding the controller.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::error::{Result, SyncError};

/// Install a console subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "courtsync=debug" } else { "courtsync=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_names(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| SyncError::Logging(e.to_string()))
}
