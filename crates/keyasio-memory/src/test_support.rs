//! Scripted reader for polling and scanner tests.

use crossbeam_channel::Sender;
use keyasio_core::{
    BeatmapRecord, GeneralRecord, InvalidRead, MemoryReader, PlayerIdentityRecord,
    PlayerStatsRecord, TimingRecord,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// What the scripted reader returns. Tests mutate it through [`ReaderScript`].
#[derive(Debug, Default)]
pub struct ScriptState {
    pub can_read: bool,
    pub general: Option<GeneralRecord>,
    pub identity: Option<PlayerIdentityRecord>,
    pub stats: Option<PlayerStatsRecord>,
    pub beatmap: Option<BeatmapRecord>,
    /// Timing reads are served from the front; when empty, `timing` is used.
    pub timing_queue: VecDeque<Option<i32>>,
    pub timing: Option<i32>,
    /// Liveness reported once the general record has been read this tick.
    pub can_read_after_general: Option<bool>,
    pub executable: Option<PathBuf>,
    pub executable_lookups: usize,
    pub timing_reads: usize,
    pub invalid_sink: Option<Sender<InvalidRead>>,
    pub subscribed: bool,
    pub dropped: bool,
}

/// Handle to the state shared with a [`ScriptedReader`].
#[derive(Debug, Clone, Default)]
pub struct ReaderScript(pub Arc<Mutex<ScriptState>>);

impl ReaderScript {
    pub fn new() -> Self {
        let script = Self::default();
        script.0.lock().executable = Some(PathBuf::from("/games/osu!/osu!.exe"));
        script
    }

    pub fn reader(&self) -> ScriptedReader {
        ScriptedReader {
            script: self.0.clone(),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut ScriptState)) {
        f(&mut self.0.lock());
    }

    pub fn executable_lookups(&self) -> usize {
        self.0.lock().executable_lookups
    }

    /// Emit an invalid read through the subscribed sink, if any.
    pub fn raise_invalid(&self, record: &'static str, prop_path: &str) {
        if let Some(sink) = &self.0.lock().invalid_sink {
            let _ = sink.send(InvalidRead::new(record, prop_path));
        }
    }
}

pub struct ScriptedReader {
    script: Arc<Mutex<ScriptState>>,
}

impl MemoryReader for ScriptedReader {
    fn can_read(&self) -> bool {
        self.script.lock().can_read
    }

    fn try_read_general(&mut self) -> Option<GeneralRecord> {
        let mut state = self.script.lock();
        let record = state.general;
        if let Some(live) = state.can_read_after_general.take() {
            state.can_read = live;
        }
        record
    }

    fn try_read_player_identity(&mut self) -> Option<PlayerIdentityRecord> {
        self.script.lock().identity.clone()
    }

    fn try_read_player_stats(&mut self) -> Option<PlayerStatsRecord> {
        self.script.lock().stats
    }

    fn try_read_beatmap(&mut self) -> Option<BeatmapRecord> {
        self.script.lock().beatmap.clone()
    }

    fn try_read_timing(&mut self) -> Option<TimingRecord> {
        let mut state = self.script.lock();
        state.timing_reads += 1;
        let value = match state.timing_queue.pop_front() {
            Some(queued) => queued,
            None => state.timing,
        };
        value.map(|audio_time| TimingRecord { audio_time })
    }

    fn executable_path(&self) -> Option<PathBuf> {
        let mut state = self.script.lock();
        state.executable_lookups += 1;
        state.executable.clone()
    }

    fn subscribe_invalid_reads(&mut self, sink: Sender<InvalidRead>) {
        let mut state = self.script.lock();
        state.invalid_sink = Some(sink);
        state.subscribed = true;
    }

    fn unsubscribe_invalid_reads(&mut self) {
        let mut state = self.script.lock();
        state.invalid_sink = None;
        state.subscribed = false;
    }
}

impl Drop for ScriptedReader {
    fn drop(&mut self) {
        self.script.lock().dropped = true;
    }
}
