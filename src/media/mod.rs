pub mod handle;
pub mod sim;

pub use handle::{MediaHandle, TrackRole};
pub use sim::{ClockedTrack, SimulatedTrack, TransportCall};

#[cfg(test)]
pub use handle::MockMediaHandle;
