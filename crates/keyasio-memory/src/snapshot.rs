//! Shared game state snapshot.
//!
//! Written by the scan thread only, read from any number of threads. Each field
//! is published on its own: a reader may see some fields from one tick and the
//! rest from the previous one, but never a half-written value.

use keyasio_core::{BeatmapIdentifier, Mods, OsuStatus};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

/// Latest known state of the osu! client.
#[derive(Debug)]
pub struct StateSnapshot {
    /// Audio position in milliseconds.
    playing_time: AtomicI32,
    /// Raw [`OsuStatus`] code.
    status: AtomicI32,
    /// Raw [`Mods`] bits.
    mods: AtomicU32,
    combo: AtomicI32,
    score: AtomicI32,
    is_replay: AtomicBool,
    player_name: RwLock<Option<String>>,
    beatmap: RwLock<Option<BeatmapIdentifier>>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self {
            playing_time: AtomicI32::new(0),
            status: AtomicI32::new(OsuStatus::NotRunning.as_raw()),
            mods: AtomicU32::new(0),
            combo: AtomicI32::new(0),
            score: AtomicI32::new(0),
            is_replay: AtomicBool::new(false),
            player_name: RwLock::new(None),
            beatmap: RwLock::new(None),
        }
    }

    /// Audio position in milliseconds, either read or interpolated.
    pub fn playing_time(&self) -> i32 {
        self.playing_time.load(Ordering::Acquire)
    }

    pub fn status(&self) -> OsuStatus {
        OsuStatus::from_raw(self.status.load(Ordering::Acquire))
    }

    pub fn mods(&self) -> Mods {
        Mods::from_raw(self.mods.load(Ordering::Acquire))
    }

    pub fn combo(&self) -> i32 {
        self.combo.load(Ordering::Acquire)
    }

    pub fn score(&self) -> i32 {
        self.score.load(Ordering::Acquire)
    }

    pub fn is_replay(&self) -> bool {
        self.is_replay.load(Ordering::Acquire)
    }

    pub fn player_name(&self) -> Option<String> {
        self.player_name.read().clone()
    }

    /// Currently loaded beatmap, if one has been fully read.
    pub fn beatmap(&self) -> Option<BeatmapIdentifier> {
        self.beatmap.read().clone()
    }

    /// Copy every field into a plain value.
    pub fn capture(&self) -> SnapshotView {
        SnapshotView {
            playing_time: self.playing_time(),
            player_name: self.player_name(),
            mods: self.mods(),
            status: self.status(),
            combo: self.combo(),
            score: self.score(),
            is_replay: self.is_replay(),
            beatmap: self.beatmap(),
        }
    }

    pub(crate) fn set_playing_time(&self, ms: i32) {
        self.playing_time.store(ms, Ordering::Release);
    }

    pub(crate) fn set_status(&self, status: OsuStatus) {
        self.status.store(status.as_raw(), Ordering::Release);
    }

    pub(crate) fn set_mods(&self, mods: Mods) {
        self.mods.store(mods.bits(), Ordering::Release);
    }

    pub(crate) fn set_combo(&self, combo: i32) {
        self.combo.store(combo, Ordering::Release);
    }

    pub(crate) fn set_score(&self, score: i32) {
        self.score.store(score, Ordering::Release);
    }

    pub(crate) fn set_replay(&self, is_replay: bool) {
        self.is_replay.store(is_replay, Ordering::Release);
    }

    pub(crate) fn set_player_name(&self, name: Option<String>) {
        *self.player_name.write() = name;
    }

    pub(crate) fn set_beatmap(&self, beatmap: BeatmapIdentifier) {
        *self.beatmap.write() = Some(beatmap);
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of a [`StateSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SnapshotView {
    pub playing_time: i32,
    pub player_name: Option<String>,
    pub mods: Mods,
    pub status: OsuStatus,
    pub combo: i32,
    pub score: i32,
    pub is_replay: bool,
    pub beatmap: Option<BeatmapIdentifier>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        let snapshot = StateSnapshot::new();
        assert_eq!(snapshot.status(), OsuStatus::NotRunning);
        assert_eq!(snapshot.playing_time(), 0);
        assert!(snapshot.beatmap().is_none());
        assert_eq!(snapshot.capture(), SnapshotView::default());
    }

    #[test]
    fn test_fields_update_independently() {
        let snapshot = StateSnapshot::new();
        snapshot.set_status(OsuStatus::Playing);
        snapshot.set_mods(Mods::DOUBLE_TIME | Mods::HIDDEN);
        snapshot.set_combo(120);
        snapshot.set_player_name(Some("peppy".into()));

        let view = snapshot.capture();
        assert_eq!(view.status, OsuStatus::Playing);
        assert_eq!(view.mods, Mods::DOUBLE_TIME | Mods::HIDDEN);
        assert_eq!(view.combo, 120);
        assert_eq!(view.score, 0);
        assert_eq!(view.player_name.as_deref(), Some("peppy"));
    }

    #[test]
    fn test_beatmap_is_never_torn() {
        let snapshot = Arc::new(StateSnapshot::new());
        let writer = {
            let snapshot = snapshot.clone();
            thread::spawn(move || {
                for i in 0..2000 {
                    snapshot.set_beatmap(BeatmapIdentifier::new(
                        format!("/songs/{i}"),
                        format!("{i}.osu"),
                    ));
                }
            })
        };

        let reader = {
            let snapshot = snapshot.clone();
            thread::spawn(move || {
                for _ in 0..2000 {
                    if let Some(id) = snapshot.beatmap() {
                        let dir = id.directory().file_name().unwrap().to_str().unwrap().to_string();
                        assert_eq!(format!("{dir}.osu"), id.file_name());
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(snapshot.beatmap().unwrap().file_name(), "1999.osu");
    }

    #[test]
    fn test_view_serializes() {
        let snapshot = StateSnapshot::new();
        snapshot.set_playing_time(12_345);
        let json = serde_json::to_string(&snapshot.capture()).unwrap();
        assert!(json.contains("\"playing_time\":12345"));
    }
}
