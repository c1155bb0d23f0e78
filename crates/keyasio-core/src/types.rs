//! Core domain types for KeyAsio.

pub mod beatmap;
pub mod mods;
pub mod records;
pub mod status;

pub use beatmap::BeatmapIdentifier;
pub use mods::Mods;
pub use records::{
    BeatmapRecord, GeneralRecord, PlayerIdentityRecord, PlayerStatsRecord, TimingRecord,
};
pub use status::OsuStatus;
