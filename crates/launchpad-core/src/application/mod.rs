//! Application layer for Launchpad.
//!
//! This layer contains:
//! - **Services**: The create-project orchestrator, rollback, structure enhancement
//! - **Ports**: Interface definitions (traits) for processes, filesystem, progress
//! - **Errors**: Pipeline failure types
//!
//! The application layer sequences the domain's plans but decides nothing
//! about which commands to run. That lives in `crate::domain`.

pub mod cancellation;
pub mod error;
pub mod ports;
pub mod services;

pub use cancellation::CancellationToken;
pub use services::{
    FolderStructureEnhancer, Orchestrator, PipelineOptions, RollbackManager, RollbackOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, NoopReporter, ProgressReporter};

pub use error::{ApplicationError, ErrorCause};
