//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from the outside world.
//! The `launchpad-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{ExecutionResult, Invocation, OutputMode, StepKind, StepOutcome};

/// Port for running external commands.
///
/// Implemented by:
/// - `launchpad_adapters::process::ProcessRunner` (production)
/// - `launchpad_adapters::process::RecordingRunner` (testing)
///
/// ## Contract
///
/// - Blocks until the child exits; never runs two commands at once
/// - stdin is closed and the non-interactive environment is applied
/// - A non-zero exit is `ExternalProcess`, a failed launch is `Spawn`
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        invocation: &Invocation,
        mode: OutputMode,
    ) -> Result<ExecutionResult, ApplicationError>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `launchpad_adapters::filesystem::LocalFilesystem` (production)
/// - `launchpad_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create exactly one directory. The parent must exist.
    ///
    /// Fails with `DirectoryExists` when anything is already at `path`.
    fn create_dir(&self, path: &Path) -> Result<(), ApplicationError>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError>;

    /// Write a file only if nothing exists at `path`.
    ///
    /// Returns `false` (and leaves the existing entry alone) otherwise.
    fn write_file_new(&self, path: &Path, content: &str) -> Result<bool, ApplicationError>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError>;

    /// Every entry below `root`, relative to it, sorted.
    fn list_tree(&self, root: &Path) -> Result<Vec<PathBuf>, ApplicationError>;
}

/// Port for step-progress notifications.
///
/// Implemented by the CLI's spinner UI; `NoopReporter` otherwise.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn step_started(&self, step: StepKind);

    /// Called right before each external command of the current step.
    fn invocation_started(&self, invocation: &Invocation);

    fn step_finished(&self, step: StepKind, outcome: &StepOutcome);
}

/// Reporter that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step_started(&self, _step: StepKind) {}
    fn invocation_started(&self, _invocation: &Invocation) {}
    fn step_finished(&self, _step: StepKind, _outcome: &StepOutcome) {}
}
