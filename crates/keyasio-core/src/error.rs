//! Error types for KeyAsio.

use thiserror::Error;

/// Result type alias using KeyAsio's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for KeyAsio.
#[derive(Error, Debug)]
pub enum Error {
    // Reader errors
    #[error("Memory reader unavailable: {0}")]
    ReaderUnavailable(String),

    // Scanner errors
    #[error("Failed to spawn scan thread: {0}")]
    ThreadSpawn(String),

    #[error("Scan thread panicked")]
    ScanPanicked,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if this error prevents the scanner from starting.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ReaderUnavailable(_) | Self::ThreadSpawn(_) | Self::ScanPanicked
        )
    }
}
