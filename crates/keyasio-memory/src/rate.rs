//! Playback rate correction for interpolation.

use keyasio_core::{Mods, OsuStatus};

/// Playback speed multiplier implied by the client state.
///
/// Only applies while playing; any other screen runs at 1.0. When both rate
/// classes are set, double time wins.
pub const fn playback_rate(status: OsuStatus, mods: Mods) -> f64 {
    if !status.is_playing() {
        return 1.0;
    }
    if mods.is_double_time() {
        1.5
    } else if mods.is_half_time() {
        0.75
    } else {
        1.0
    }
}
