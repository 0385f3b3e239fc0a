//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `launchpad-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandRunner`: External process execution
//!   - `Filesystem`: Directory creation, placeholder files, rollback deletion
//!   - `ProgressReporter`: Step notifications for the UI
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `Orchestrator::create_project`, called by the CLI

pub mod output;

#[cfg(test)]
pub use output::MockProgressReporter;
pub use output::{CommandRunner, Filesystem, NoopReporter, ProgressReporter};
