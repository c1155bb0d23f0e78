//! Scan configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Intervals the scanner runs with.
///
/// Values are taken as given; the caller is responsible for choosing sane ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Cadence of status, player, stats, and beatmap reads.
    pub general_scan_interval_ms: u64,
    /// Cadence of audio clock reads.
    pub timing_scan_interval_ms: u64,
    /// How often the reader looks for the osu! process while detached.
    pub process_watcher_delay_ms: u64,
}

impl ScanConfig {
    pub const fn new(
        general_scan_interval_ms: u64,
        timing_scan_interval_ms: u64,
        process_watcher_delay_ms: u64,
    ) -> Self {
        Self {
            general_scan_interval_ms,
            timing_scan_interval_ms,
            process_watcher_delay_ms,
        }
    }

    pub const fn general_interval(&self) -> Duration {
        Duration::from_millis(self.general_scan_interval_ms)
    }

    pub const fn timing_interval(&self) -> Duration {
        Duration::from_millis(self.timing_scan_interval_ms)
    }

    pub const fn process_watcher_delay(&self) -> Duration {
        Duration::from_millis(self.process_watcher_delay_ms)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(50, 16, 500)
    }
}
