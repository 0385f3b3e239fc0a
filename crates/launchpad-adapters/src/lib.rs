//! Infrastructure adapters for Launchpad.
//!
//! This crate implements the ports defined in `launchpad-core::application::ports`.
//! It contains all process and filesystem I/O.

pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ProcessRunner, RecordingRunner};
