//! # keyasio-memory
//!
//! Live osu! state reconstruction for audio sync.
//!
//! Features:
//! - Dedicated scan thread with idempotent start/stop
//! - Separate timing and general read cadences
//! - Rate-corrected interpolation of the audio clock between reads
//! - Lock-free snapshot readable from any thread

pub mod config;
pub mod polling;
pub mod rate;
pub mod resolver;
pub mod scanner;
pub mod simulated;
pub mod snapshot;
pub mod stopwatch;

#[cfg(test)]
mod test_support;

pub use config::ScanConfig;
pub use polling::PollingLoop;
pub use rate::playback_rate;
pub use resolver::BeatmapResolver;
pub use scanner::MemoryScanner;
pub use simulated::{SimulatedReader, SimulationScript};
pub use snapshot::{SnapshotView, StateSnapshot};
