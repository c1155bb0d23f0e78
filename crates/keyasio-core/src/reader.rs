//! The memory reader capability.
//!
//! Reading another process's memory and decoding it into records lives outside
//! this workspace. The scanner only needs the narrow surface below, injected
//! through a [`ReaderFactory`] when it starts.

use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::types::{
    BeatmapRecord, GeneralRecord, PlayerIdentityRecord, PlayerStatsRecord, TimingRecord,
};

/// Notification that a read produced a structurally invalid record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRead {
    /// Name of the record type that failed to decode.
    pub record: &'static str,
    /// Path of the offending property inside that record.
    pub prop_path: String,
}

impl InvalidRead {
    pub fn new(record: &'static str, prop_path: impl Into<String>) -> Self {
        Self {
            record,
            prop_path: prop_path.into(),
        }
    }
}

/// Best-effort, non-blocking access to the osu! client's memory.
///
/// Every `try_read_*` returns `None` when the record could not be read this
/// time; callers treat that as "no new information", never as an error.
pub trait MemoryReader: Send {
    /// Whether the process is present and its memory layout is readable.
    fn can_read(&self) -> bool;

    fn try_read_general(&mut self) -> Option<GeneralRecord>;

    fn try_read_player_identity(&mut self) -> Option<PlayerIdentityRecord>;

    fn try_read_player_stats(&mut self) -> Option<PlayerStatsRecord>;

    fn try_read_beatmap(&mut self) -> Option<BeatmapRecord>;

    fn try_read_timing(&mut self) -> Option<TimingRecord>;

    /// Resolved path of the monitored executable, when the process is attached.
    fn executable_path(&self) -> Option<PathBuf>;

    /// Route [`InvalidRead`] notifications to `sink` until unsubscribed.
    fn subscribe_invalid_reads(&mut self, sink: Sender<InvalidRead>) {
        let _ = sink;
    }

    fn unsubscribe_invalid_reads(&mut self) {}
}

impl<R: MemoryReader + ?Sized> MemoryReader for Box<R> {
    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn try_read_general(&mut self) -> Option<GeneralRecord> {
        (**self).try_read_general()
    }

    fn try_read_player_identity(&mut self) -> Option<PlayerIdentityRecord> {
        (**self).try_read_player_identity()
    }

    fn try_read_player_stats(&mut self) -> Option<PlayerStatsRecord> {
        (**self).try_read_player_stats()
    }

    fn try_read_beatmap(&mut self) -> Option<BeatmapRecord> {
        (**self).try_read_beatmap()
    }

    fn try_read_timing(&mut self) -> Option<TimingRecord> {
        (**self).try_read_timing()
    }

    fn executable_path(&self) -> Option<PathBuf> {
        (**self).executable_path()
    }

    fn subscribe_invalid_reads(&mut self, sink: Sender<InvalidRead>) {
        (**self).subscribe_invalid_reads(sink);
    }

    fn unsubscribe_invalid_reads(&mut self) {
        (**self).unsubscribe_invalid_reads();
    }
}

/// Builds a [`MemoryReader`] for a scan session.
///
/// `watcher_delay` is how often the reader should look for the process while
/// it is not attached.
pub trait ReaderFactory: Send + Sync {
    fn create(&self, watcher_delay: Duration) -> Result<Box<dyn MemoryReader>>;
}

impl<F> ReaderFactory for F
where
    F: Fn(Duration) -> Result<Box<dyn MemoryReader>> + Send + Sync,
{
    fn create(&self, watcher_delay: Duration) -> Result<Box<dyn MemoryReader>> {
        self(watcher_delay)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    struct DeadReader;

    impl MemoryReader for DeadReader {
        fn can_read(&self) -> bool {
            false
        }
        fn try_read_general(&mut self) -> Option<GeneralRecord> {
            None
        }
        fn try_read_player_identity(&mut self) -> Option<PlayerIdentityRecord> {
            None
        }
        fn try_read_player_stats(&mut self) -> Option<PlayerStatsRecord> {
            None
        }
        fn try_read_beatmap(&mut self) -> Option<BeatmapRecord> {
            None
        }
        fn try_read_timing(&mut self) -> Option<TimingRecord> {
            None
        }
        fn executable_path(&self) -> Option<PathBuf> {
            None
        }
    }

    #[test]
    fn test_closure_factory() {
        let factory = |_delay: Duration| -> Result<Box<dyn MemoryReader>> { Ok(Box::new(DeadReader)) };
        let mut reader = factory.create(Duration::from_millis(500)).unwrap();
        assert!(!reader.can_read());
        assert!(reader.try_read_timing().is_none());
    }

    #[test]
    fn test_factory_error_passes_through() {
        let factory = |_delay: Duration| -> Result<Box<dyn MemoryReader>> {
            Err(Error::ReaderUnavailable("no backend".into()))
        };
        let err = factory.create(Duration::ZERO).err().unwrap();
        assert!(err.is_fatal());
    }
}
