//! Scripted stand-in for a real osu! memory reader.
//!
//! Plays back a fixed session on the wall clock: the process shows up after a
//! delay, sits in the main menu, then cycles song select, a play, and the
//! results screen. Useful for running the scanner without the game.

use crate::rate::playback_rate;
use crossbeam_channel::Sender;
use keyasio_core::{
    BeatmapRecord, GeneralRecord, InvalidRead, MemoryReader, Mods, OsuStatus,
    PlayerIdentityRecord, PlayerStatsRecord, TimingRecord,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Session played back by a [`SimulatedReader`]. Durations in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationScript {
    pub executable_path: PathBuf,
    pub player_name: String,
    pub beatmap_folder: String,
    pub beatmap_file: String,
    pub mods: Mods,
    /// Delay before the process appears.
    pub attach_after_ms: u64,
    pub menu_ms: u64,
    pub song_select_ms: u64,
    pub play_ms: u64,
    pub results_ms: u64,
    /// Resolution of the client's audio clock.
    pub audio_step_ms: u64,
    /// Every Nth timing read fails. 0 never fails.
    pub timing_miss_every: u32,
}

impl Default for SimulationScript {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from("C:/osu!/osu!.exe"),
            player_name: "Guest".to_string(),
            beatmap_folder: "1 Simulated - Session".to_string(),
            beatmap_file: "Simulated - Session (KeyAsio) [Normal].osu".to_string(),
            mods: Mods::DOUBLE_TIME,
            attach_after_ms: 1_000,
            menu_ms: 1_000,
            song_select_ms: 2_000,
            play_ms: 10_000,
            results_ms: 2_000,
            audio_step_ms: 10,
            timing_miss_every: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Detached,
    Menu,
    SongSelect,
    Playing { elapsed_ms: u64 },
    Results,
}

/// [`MemoryReader`] serving a [`SimulationScript`].
pub struct SimulatedReader {
    script: SimulationScript,
    started: Instant,
    /// When the process becomes visible, rounded up to the watcher delay.
    attach_at: Duration,
    timing_reads: u32,
    invalid_sink: Option<Sender<InvalidRead>>,
}

impl SimulatedReader {
    pub fn new(script: SimulationScript, watcher_delay: Duration) -> Self {
        let attach_at = attach_time(script.attach_after_ms, watcher_delay);
        debug!("Simulated osu! process attaches after {attach_at:?}");
        Self {
            script,
            started: Instant::now(),
            attach_at,
            timing_reads: 0,
            invalid_sink: None,
        }
    }

    fn phase(&self) -> Phase {
        self.phase_at(self.started.elapsed())
    }

    fn phase_at(&self, since_start: Duration) -> Phase {
        let Some(attached_for) = since_start.checked_sub(self.attach_at) else {
            return Phase::Detached;
        };
        let ms = attached_for.as_millis() as u64;
        let s = &self.script;
        if ms < s.menu_ms {
            return Phase::Menu;
        }

        let cycle = s.song_select_ms + s.play_ms + s.results_ms;
        if cycle == 0 {
            return Phase::SongSelect;
        }
        let t = (ms - s.menu_ms) % cycle;
        if t < s.song_select_ms {
            Phase::SongSelect
        } else if t < s.song_select_ms + s.play_ms {
            Phase::Playing {
                elapsed_ms: t - s.song_select_ms,
            }
        } else {
            Phase::Results
        }
    }

    fn audio_time(&self, phase: Phase) -> i32 {
        let Phase::Playing { elapsed_ms } = phase else {
            return 0;
        };
        let rate = playback_rate(OsuStatus::Playing, self.script.mods);
        let raw = elapsed_ms as f64 * rate;
        let step = self.script.audio_step_ms.max(1) as f64;
        ((raw / step).floor() * step) as i32
    }
}

fn attach_time(attach_after_ms: u64, watcher_delay: Duration) -> Duration {
    let delay = watcher_delay.as_millis() as u64;
    if delay == 0 {
        return Duration::from_millis(attach_after_ms);
    }
    Duration::from_millis(attach_after_ms.div_ceil(delay) * delay)
}

impl MemoryReader for SimulatedReader {
    fn can_read(&self) -> bool {
        self.phase() != Phase::Detached
    }

    fn try_read_general(&mut self) -> Option<GeneralRecord> {
        let status = match self.phase() {
            Phase::Detached => return None,
            Phase::Menu => OsuStatus::MainMenu,
            Phase::SongSelect => OsuStatus::SongSelect,
            Phase::Playing { .. } => OsuStatus::Playing,
            Phase::Results => OsuStatus::ResultsScreen,
        };
        Some(GeneralRecord::new(status, self.script.mods))
    }

    fn try_read_player_identity(&mut self) -> Option<PlayerIdentityRecord> {
        if self.phase() == Phase::Detached {
            if let Some(sink) = &self.invalid_sink {
                let _ = sink.send(InvalidRead::new("PlayerIdentityRecord", "Username"));
            }
            return None;
        }
        Some(PlayerIdentityRecord {
            username: Some(self.script.player_name.clone()),
        })
    }

    fn try_read_player_stats(&mut self) -> Option<PlayerStatsRecord> {
        let phase = self.phase();
        if !matches!(phase, Phase::Playing { .. }) {
            return None;
        }
        let combo = self.audio_time(phase) / 250;
        Some(PlayerStatsRecord {
            combo,
            score: combo * 300,
            is_replay: false,
        })
    }

    fn try_read_beatmap(&mut self) -> Option<BeatmapRecord> {
        match self.phase() {
            Phase::Detached | Phase::Menu => None,
            _ => Some(BeatmapRecord::new(
                self.script.beatmap_folder.clone(),
                self.script.beatmap_file.clone(),
            )),
        }
    }

    fn try_read_timing(&mut self) -> Option<TimingRecord> {
        let phase = self.phase();
        if phase == Phase::Detached {
            return None;
        }
        self.timing_reads = self.timing_reads.wrapping_add(1);
        let every = self.script.timing_miss_every;
        if every > 0 && self.timing_reads % every == 0 {
            return None;
        }
        Some(TimingRecord {
            audio_time: self.audio_time(phase),
        })
    }

    fn executable_path(&self) -> Option<PathBuf> {
        if self.can_read() {
            Some(self.script.executable_path.clone())
        } else {
            None
        }
    }

    fn subscribe_invalid_reads(&mut self, sink: Sender<InvalidRead>) {
        self.invalid_sink = Some(sink);
    }

    fn unsubscribe_invalid_reads(&mut self) {
        self.invalid_sink = None;
    }
}
