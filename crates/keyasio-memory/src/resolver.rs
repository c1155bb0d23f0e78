//! Beatmap identity resolution.

use keyasio_core::BeatmapIdentifier;
use std::path::{Path, PathBuf};

/// Name of the beatmap folder next to the osu! executable.
pub const SONGS_FOLDER: &str = "Songs";

/// Turns raw folder/file names read from memory into a [`BeatmapIdentifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatmapResolver;

impl BeatmapResolver {
    /// Beatmap base directory for an osu! install, given its executable path.
    ///
    /// Returns `None` when the path has no parent directory.
    pub fn songs_directory(executable: &Path) -> Option<PathBuf> {
        let install_dir = executable.parent()?;
        Some(install_dir.join(SONGS_FOLDER))
    }

    /// Identifier for a beatmap. Only called once both names have been read.
    pub fn resolve(songs_directory: &Path, folder_name: &str, file_name: &str) -> BeatmapIdentifier {
        BeatmapIdentifier::new(songs_directory.join(folder_name), file_name)
    }
}
