//! Gameplay modifier flags.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Active gameplay modifiers, using the bit positions the osu! client stores.
    ///
    /// Only the rate-affecting classes matter to the sync engine; every other
    /// bit is carried through untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Mods: u32 {
        const NO_FAIL = 1;
        const EASY = 1 << 1;
        const TOUCH_DEVICE = 1 << 2;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        /// Playback at 1.5x.
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        /// Playback at 0.75x.
        const HALF_TIME = 1 << 8;
        /// Double time with pitch shift. The client sets `DOUBLE_TIME` alongside it.
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
        const AUTOPLAY = 1 << 11;
        const SPUN_OUT = 1 << 12;
        const AUTOPILOT = 1 << 13;
        const PERFECT = 1 << 14;
        const CINEMA = 1 << 22;
        const SCORE_V2 = 1 << 29;
        const MIRROR = 1 << 30;
    }
}

impl Mods {
    /// Flags that speed playback up to 1.5x.
    pub const DOUBLE_TIME_CLASS: Self = Self::DOUBLE_TIME.union(Self::NIGHTCORE);

    /// Flags that slow playback down to 0.75x.
    pub const HALF_TIME_CLASS: Self = Self::HALF_TIME;

    /// Build from the raw value read from memory, keeping unknown bits.
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }

    pub const fn is_double_time(self) -> bool {
        self.intersects(Self::DOUBLE_TIME_CLASS)
    }

    pub const fn is_half_time(self) -> bool {
        self.intersects(Self::HALF_TIME_CLASS)
    }
}

impl Default for Mods {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        bitflags::parser::to_writer(self, f)
    }
}
