//! # keyasio-core
//!
//! Core types, the memory reader capability, and error handling for
//! KeyAsio's osu! memory sync.

pub mod error;
pub mod reader;
pub mod types;

pub use error::{Error, Result};
pub use reader::{InvalidRead, MemoryReader, ReaderFactory};
pub use types::*;
