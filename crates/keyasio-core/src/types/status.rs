//! osu! client status codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen the osu! client currently shows, as stored in its memory.
///
/// Discriminants are the raw codes the client writes; [`OsuStatus::NotRunning`]
/// is never read from memory and is only produced when the process is gone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum OsuStatus {
    #[default]
    NotRunning = -1,
    Unknown = -2,
    MainMenu = 0,
    EditingMap = 1,
    Playing = 2,
    GameShutdownAnimation = 3,
    SongSelectEdit = 4,
    SongSelect = 5,
    ResultsScreen = 7,
    GameStartupAnimation = 10,
    MultiplayerRooms = 11,
    MultiplayerRoom = 12,
    MultiplayerSongSelect = 13,
    MultiplayerResultsScreen = 14,
    OsuDirect = 15,
    RankingTagCoop = 17,
    RankingTeam = 18,
    ProcessingBeatmaps = 19,
    Tourney = 22,
}

impl OsuStatus {
    /// Map a raw status code to a status. Unrecognised codes become `Unknown`.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            -1 => Self::NotRunning,
            0 => Self::MainMenu,
            1 => Self::EditingMap,
            2 => Self::Playing,
            3 => Self::GameShutdownAnimation,
            4 => Self::SongSelectEdit,
            5 => Self::SongSelect,
            7 => Self::ResultsScreen,
            10 => Self::GameStartupAnimation,
            11 => Self::MultiplayerRooms,
            12 => Self::MultiplayerRoom,
            13 => Self::MultiplayerSongSelect,
            14 => Self::MultiplayerResultsScreen,
            15 => Self::OsuDirect,
            17 => Self::RankingTagCoop,
            18 => Self::RankingTeam,
            19 => Self::ProcessingBeatmaps,
            22 => Self::Tourney,
            _ => Self::Unknown,
        }
    }

    /// The raw code for this status.
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl fmt::Display for OsuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_raw_codes() {
        assert_eq!(OsuStatus::from_raw(2), OsuStatus::Playing);
        assert_eq!(OsuStatus::from_raw(-1), OsuStatus::NotRunning);
        assert_eq!(OsuStatus::from_raw(6), OsuStatus::Unknown);
        assert_eq!(OsuStatus::from_raw(999), OsuStatus::Unknown);
        assert_eq!(OsuStatus::ResultsScreen.as_raw(), 7);
    }

    #[test]
    fn test_status_default() {
        assert_eq!(OsuStatus::default(), OsuStatus::NotRunning);
        assert!(!OsuStatus::default().is_playing());
    }

    #[test]
    fn test_known_codes_survive_raw_conversion() {
        for status in [
            OsuStatus::MainMenu,
            OsuStatus::Playing,
            OsuStatus::SongSelect,
            OsuStatus::MultiplayerResultsScreen,
            OsuStatus::Tourney,
        ] {
            assert_eq!(OsuStatus::from_raw(status.as_raw()), status);
        }
    }
}
