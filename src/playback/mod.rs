pub mod poller;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod sync;
pub mod transport;

pub use poller::PlaybackPoller;
pub use session::{ComparisonSession, SessionHandle, SessionMessage};
pub use snapshot::{MediaTrackState, PlaybackSnapshot, PollSample};
pub use state::SyncState;
pub use sync::SyncController;
pub use transport::{
    time_readout, DisplayMode, TransportCommand, TransportFacade, TransportIntent, TransportOutcome,
};
