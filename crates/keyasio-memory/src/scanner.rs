//! Scanner lifecycle: owns the reader and the scan thread.

use crate::config::ScanConfig;
use crate::polling::PollingLoop;
use crate::snapshot::StateSnapshot;
use crossbeam_channel::{bounded, unbounded, Sender};
use keyasio_core::{Error, MemoryReader, ReaderFactory, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, error, info};

/// A scan session in progress.
struct RunningScan {
    /// Dropping this cancels the loop.
    cancel: Sender<()>,
    /// Yields the reader back once the loop has returned.
    handle: JoinHandle<Box<dyn MemoryReader>>,
}

/// Starts and stops memory scanning and publishes results to a shared snapshot.
///
/// The snapshot outlives individual sessions: restarting the scanner keeps
/// writing to the same [`StateSnapshot`].
pub struct MemoryScanner {
    factory: Box<dyn ReaderFactory>,
    snapshot: Arc<StateSnapshot>,
    running: Mutex<Option<RunningScan>>,
}

impl MemoryScanner {
    /// Create a stopped scanner that builds readers with `factory`.
    pub fn new(factory: impl ReaderFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            snapshot: Arc::new(StateSnapshot::new()),
            running: Mutex::new(None),
        }
    }

    /// Shared state written by the scan thread.
    pub fn snapshot(&self) -> Arc<StateSnapshot> {
        self.snapshot.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Start scanning on a dedicated thread. Does nothing if already running.
    ///
    /// Fails without starting when the reader cannot be created.
    pub fn start(&self, config: ScanConfig) -> Result<()> {
        let mut running = self.running.lock();
        if running.is_some() {
            debug!("Memory scanner already running");
            return Ok(());
        }

        let mut reader = self.factory.create(config.process_watcher_delay())?;

        let (invalid_tx, invalid_rx) = unbounded();
        reader.subscribe_invalid_reads(invalid_tx);

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let polling = PollingLoop::new(
            reader,
            self.snapshot.clone(),
            &config,
            invalid_rx,
            Instant::now(),
        );

        let handle = std::thread::Builder::new()
            .name("memory-scan".to_string())
            .spawn(move || polling.run(&cancel_rx))
            .map_err(|e| Error::ThreadSpawn(e.to_string()))?;

        *running = Some(RunningScan {
            cancel: cancel_tx,
            handle,
        });

        info!(
            "Memory scanner started (general {}ms, timing {}ms, watcher {}ms)",
            config.general_scan_interval_ms,
            config.timing_scan_interval_ms,
            config.process_watcher_delay_ms
        );
        Ok(())
    }

    /// Stop scanning and release the reader. Does nothing if not running.
    ///
    /// Blocks until the scan thread has exited. Only fails if that thread panicked.
    pub fn stop(&self) -> Result<()> {
        // Held across the join so a concurrent start cannot overlap the old loop.
        let mut running = self.running.lock();
        let Some(scan) = running.take() else {
            return Ok(());
        };

        drop(scan.cancel);
        let mut reader = scan.handle.join().map_err(|_| Error::ScanPanicked)?;
        reader.unsubscribe_invalid_reads();
        drop(reader);

        info!("Memory scanner stopped");
        Ok(())
    }
}

impl Drop for MemoryScanner {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("Failed to stop memory scanner: {e}");
        }
    }
}
