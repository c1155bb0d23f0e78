//! Raw records decoded from the client's memory by a [`MemoryReader`].
//!
//! [`MemoryReader`]: crate::MemoryReader

use serde::{Deserialize, Serialize};

use super::{Mods, OsuStatus};

/// Client status and active modifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GeneralRecord {
    pub status: OsuStatus,
    pub mods: Mods,
}

impl GeneralRecord {
    pub const fn new(status: OsuStatus, mods: Mods) -> Self {
        Self { status, mods }
    }
}

/// Logged-in player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlayerIdentityRecord {
    pub username: Option<String>,
}

/// Live stats of the current play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlayerStatsRecord {
    pub combo: i32,
    pub score: i32,
    pub is_replay: bool,
}

/// Loaded beatmap, as raw folder and file names. Either may be missing while
/// the client is switching maps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BeatmapRecord {
    pub folder_name: Option<String>,
    pub osu_file_name: Option<String>,
}

impl BeatmapRecord {
    pub fn new(folder_name: impl Into<String>, osu_file_name: impl Into<String>) -> Self {
        Self {
            folder_name: Some(folder_name.into()),
            osu_file_name: Some(osu_file_name.into()),
        }
    }
}

/// Audio clock of the client, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TimingRecord {
    pub audio_time: i32,
}
