//! Beatmap identity.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stable on-disk identity of the loaded beatmap: its folder and `.osu` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BeatmapIdentifier {
    directory: PathBuf,
    file_name: String,
}

impl BeatmapIdentifier {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Folder holding the beatmap set.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Name of the difficulty's `.osu` file inside [`Self::directory`].
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the `.osu` file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
