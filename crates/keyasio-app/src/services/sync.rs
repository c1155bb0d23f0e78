//! Sync service owning the memory scanner.

use keyasio_core::{Error, MemoryReader, Result};
use keyasio_memory::{MemoryScanner, ScanConfig, SimulatedReader, SimulationScript, StateSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Runs the memory scanner for the application.
#[derive(Clone)]
pub struct SyncService {
    scanner: Arc<MemoryScanner>,
}

impl SyncService {
    /// Create a service whose scanner reads from a simulated osu! session.
    pub fn simulated(script: SimulationScript) -> Self {
        let scanner = MemoryScanner::new(move |watcher_delay: Duration| -> Result<Box<dyn MemoryReader>> {
            Ok(Box::new(SimulatedReader::new(script.clone(), watcher_delay)))
        });

        Self {
            scanner: Arc::new(scanner),
        }
    }

    /// Start scanning. Reader failures are logged and returned.
    pub fn start(&self, config: ScanConfig) -> Result<()> {
        self.scanner.start(config).inspect_err(|e| {
            error!("Failed to start memory scanner: {e}");
        })
    }

    /// Stop scanning without blocking the async runtime.
    pub async fn stop(&self) -> Result<()> {
        let scanner = self.scanner.clone();
        tokio::task::spawn_blocking(move || scanner.stop())
            .await
            .map_err(|e| Error::Internal(format!("Stop task failed: {e}")))??;
        info!("Sync service stopped");
        Ok(())
    }

    /// State shared with the audio side.
    pub fn snapshot(&self) -> Arc<StateSnapshot> {
        self.scanner.snapshot()
    }
}
