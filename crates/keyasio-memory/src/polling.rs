//! Polling loop reconciling the timing and general read cadences.

use crate::config::ScanConfig;
use crate::rate::playback_rate;
use crate::resolver::BeatmapResolver;
use crate::snapshot::StateSnapshot;
use crate::stopwatch::Stopwatch;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use keyasio_core::{BeatmapRecord, GeneralRecord, InvalidRead, MemoryReader, OsuStatus};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Minimum spacing between interpolated or fallback time updates (about one frame).
pub const THROTTLE_WINDOW: Duration = Duration::from_millis(16);

/// Pause between iterations; also bounds how long cancellation takes to notice.
pub const TICK_SLEEP: Duration = Duration::from_millis(1);

/// Scan state for one reader session. Sole writer of its [`StateSnapshot`].
pub struct PollingLoop<R: MemoryReader> {
    reader: R,
    snapshot: Arc<StateSnapshot>,
    invalid_reads: Receiver<InvalidRead>,
    general_interval: Duration,
    timing_interval: Duration,
    general_timer: Stopwatch,
    timing_timer: Stopwatch,
    throttle_timer: Stopwatch,
    /// Runs while the audio clock is advancing; stopped when it stalls.
    interpolation: Stopwatch,
    /// Last general record read, used for the playback rate.
    last_general: GeneralRecord,
    /// Last ground-truth audio time.
    last_audio_time: i32,
    was_readable: bool,
    songs_directory: Option<PathBuf>,
}

impl<R: MemoryReader> PollingLoop<R> {
    pub fn new(
        reader: R,
        snapshot: Arc<StateSnapshot>,
        config: &ScanConfig,
        invalid_reads: Receiver<InvalidRead>,
        now: Instant,
    ) -> Self {
        Self {
            reader,
            snapshot,
            invalid_reads,
            general_interval: config.general_interval(),
            timing_interval: config.timing_interval(),
            general_timer: Stopwatch::started(now),
            timing_timer: Stopwatch::started(now),
            throttle_timer: Stopwatch::started(now),
            interpolation: Stopwatch::new(),
            last_general: GeneralRecord::default(),
            last_audio_time: 0,
            was_readable: false,
            songs_directory: None,
        }
    }

    /// Beatmap base directory of the attached client, once known.
    pub fn songs_directory(&self) -> Option<&Path> {
        self.songs_directory.as_deref()
    }

    /// Tick until `cancel` fires or its sender is dropped, then hand the reader back.
    pub fn run(mut self, cancel: &Receiver<()>) -> R {
        info!(
            "Memory scan started (general {:?}, timing {:?})",
            self.general_interval, self.timing_interval
        );

        loop {
            self.tick(Instant::now());

            match cancel.recv_timeout(TICK_SLEEP) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("Memory scan stopped");
        self.reader
    }

    /// Run one iteration against the clock value `now`.
    pub fn tick(&mut self, now: Instant) {
        let rate = playback_rate(self.last_general.status, self.last_general.mods);
        self.scan_timing(now, rate);

        if self.general_timer.elapsed(now) > self.general_interval {
            self.general_timer.restart(now);
            self.scan_general();
        }

        self.drain_invalid_reads();
    }

    fn scan_timing(&mut self, now: Instant, rate: f64) {
        // Below one frame every read is ground truth and nothing is interpolated.
        let throttled = self.timing_interval >= THROTTLE_WINDOW;

        if self.timing_timer.elapsed(now) > self.timing_interval {
            self.timing_timer.restart(now);

            if let Some(record) = self.reader.try_read_timing() {
                self.snapshot.set_playing_time(record.audio_time);
                if record.audio_time == self.last_audio_time {
                    // Clock stalled (paused): stop drifting ahead of it.
                    self.interpolation.reset();
                } else {
                    self.last_audio_time = record.audio_time;
                    self.interpolation.restart(now);
                }
            } else if throttled && self.interpolation.is_running() && self.throttle_due(now) {
                self.throttle_timer.restart(now);
                trace!("Timing read missed, holding at {}ms", self.last_audio_time);
                self.snapshot.set_playing_time(self.last_audio_time);
                self.interpolation.reset();
            }
        } else if throttled && self.interpolation.is_running() && self.throttle_due(now) {
            self.throttle_timer.restart(now);
            self.snapshot.set_playing_time(self.extrapolate(now, rate));
        }
    }

    fn throttle_due(&self, now: Instant) -> bool {
        self.throttle_timer.elapsed(now) > THROTTLE_WINDOW
    }

    fn extrapolate(&self, now: Instant, rate: f64) -> i32 {
        let estimate = f64::from(self.last_audio_time) + self.interpolation.elapsed_ms(now) * rate;
        estimate as i32
    }

    fn scan_general(&mut self) {
        if !self.reader.can_read() {
            self.snapshot.set_status(OsuStatus::NotRunning);
        }

        if let Some(identity) = self.reader.try_read_player_identity() {
            self.snapshot.set_player_name(identity.username);
        }

        if let Some(general) = self.reader.try_read_general() {
            self.last_general = general;
            self.snapshot.set_mods(general.mods);
            // The read may have raced with the process exiting.
            if self.reader.can_read() {
                self.snapshot.set_status(general.status);
            }
        }

        if self.snapshot.status().is_playing() {
            if let Some(stats) = self.reader.try_read_player_stats() {
                self.snapshot.set_combo(stats.combo);
                self.snapshot.set_score(stats.score);
                self.snapshot.set_replay(stats.is_replay);
            }
        } else {
            self.snapshot.set_combo(0);
            self.snapshot.set_score(0);
            self.snapshot.set_replay(false);
        }

        self.track_liveness();

        if let Some(beatmap) = self.reader.try_read_beatmap() {
            self.update_beatmap(beatmap);
        }
    }

    fn track_liveness(&mut self) {
        let readable = self.reader.can_read();
        if readable == self.was_readable {
            return;
        }
        self.was_readable = readable;

        if !readable {
            info!("osu! process lost");
            return;
        }

        self.songs_directory = self
            .reader
            .executable_path()
            .as_deref()
            .and_then(BeatmapResolver::songs_directory);

        match &self.songs_directory {
            Some(dir) => info!("osu! attached, songs directory: {}", dir.display()),
            None => warn!("osu! attached but its executable path is unavailable"),
        }
    }

    fn update_beatmap(&self, beatmap: BeatmapRecord) {
        let (Some(folder), Some(file)) = (beatmap.folder_name, beatmap.osu_file_name) else {
            return;
        };
        let Some(songs) = self.songs_directory.as_deref() else {
            trace!("Beatmap {folder}/{file} read before songs directory is known");
            return;
        };

        let identifier = BeatmapResolver::resolve(songs, &folder, &file);
        if self.snapshot.beatmap().as_ref() != Some(&identifier) {
            debug!("Beatmap changed: {}", identifier.path().display());
            self.snapshot.set_beatmap(identifier);
        }
    }

    /// Log pending invalid reads. Noise from a closing process is dropped.
    fn drain_invalid_reads(&self) -> usize {
        let mut reported = 0;
        while let Ok(invalid) = self.invalid_reads.try_recv() {
            if self.reader.can_read() {
                error!("Invalid reading {}: {}", invalid.record, invalid.prop_path);
                reported += 1;
            }
        }
        reported
    }
}
