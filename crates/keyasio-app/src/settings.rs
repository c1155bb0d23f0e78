//! Application settings stored as JSON in the platform config directory.

use directories::ProjectDirs;
use keyasio_core::{Error, Result};
use keyasio_memory::{ScanConfig, SimulationScript};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const SETTINGS_FILE: &str = "settings.json";

/// User-editable settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Memory scan intervals.
    pub scan: ScanConfig,
    /// How often the published state is logged.
    pub report_interval_ms: u64,
    /// Session served by the simulated reader.
    pub simulation: SimulationScript,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            report_interval_ms: 500,
            simulation: SimulationScript::default(),
        }
    }
}

impl AppSettings {
    /// Load from the default location, creating the file on first run.
    pub fn load() -> Result<(Self, PathBuf)> {
        let project_dirs = ProjectDirs::from("com", "keyasio", "KeyAsio")
            .ok_or_else(|| Error::Config("Failed to determine config directory".to_string()))?;

        let path = project_dirs.config_dir().join(SETTINGS_FILE);
        let settings = Self::load_from(&path)?;
        Ok((settings, path))
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            info!("Created default settings at {}", path.display());
            return Ok(settings);
        }

        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid settings file {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub const fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}
