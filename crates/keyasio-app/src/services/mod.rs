//! Services wiring the scanner into the application.

pub mod report;
pub mod sync;

pub use sync::SyncService;
