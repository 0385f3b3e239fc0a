//! Application layer errors.
//!
//! These errors represent failures while running the pipeline, not invalid
//! configuration. Configuration errors are `DomainError` from `crate::domain`.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{Capability, StepKind};
use crate::error::ErrorCategory;

/// Errors that occur while executing the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    // ========================================================================
    // Step failures (wrap the underlying cause)
    // ========================================================================
    /// The target already exists; nothing was touched.
    #[error("Directory already exists: {}", path.display())]
    DirectoryExists { path: PathBuf },

    #[error("Bootstrap failed: {cause}")]
    BootstrapFailed { cause: Box<ApplicationError> },

    #[error("Installing {capability} failed: {cause}")]
    AddonInstallFailed {
        capability: Capability,
        cause: Box<ApplicationError>,
    },

    #[error("Dependency install failed: {cause}")]
    DependencyInstallFailed { cause: Box<ApplicationError> },

    /// Never fatal: logged and recorded as a report warning.
    #[error("Git initialization failed: {cause}")]
    VersionControlInitFailed { cause: Box<ApplicationError> },

    #[error("Folder structure setup failed: {cause}")]
    StructureFailed { cause: Box<ApplicationError> },

    // ========================================================================
    // Root causes
    // ========================================================================
    #[error("Permission denied while trying to {operation} {}", path.display())]
    PermissionDenied { path: PathBuf, operation: String },

    #[error("Could not start `{command}`: {cause}")]
    Spawn { command: String, cause: String },

    #[error("`{command}` {}", describe_exit(*exit_code))]
    ExternalProcess {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Filesystem error at {}: {reason}", path.display())]
    Filesystem { path: PathBuf, reason: String },

    #[error("Cancelled during {step}")]
    Cancelled { step: StepKind },

    #[error("Unexpected failure: {message}")]
    Unknown {
        message: String,
        #[source]
        cause: ErrorCause,
    },
}

/// The original error behind an [`ApplicationError::Unknown`].
///
/// Shared so the error stays `Clone`; two causes are equal when their
/// messages are.
#[derive(Debug, Clone)]
pub struct ErrorCause(Arc<dyn StdError + Send + Sync>);

impl ErrorCause {
    pub fn new(error: impl StdError + Send + Sync + 'static) -> Self {
        Self(Arc::new(error))
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for ErrorCause {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl PartialEq for ErrorCause {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ErrorCause {}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl ApplicationError {
    /// A failure that fits no other variant, keeping `cause` as its source.
    pub fn unknown(
        message: impl Into<String>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Unknown {
            message: message.into(),
            cause: ErrorCause::new(cause),
        }
    }

    /// Wrap a root cause into the failure of the step it happened in.
    ///
    /// Cancellation and step errors pass through unchanged.
    pub fn in_step(self, step: StepKind, capability: Option<Capability>) -> Self {
        if self.is_step_failure() || matches!(self, Self::Cancelled { .. }) {
            return self;
        }
        let cause = Box::new(self);
        match (step, capability) {
            (StepKind::Addons, Some(capability)) => Self::AddonInstallFailed { capability, cause },
            (StepKind::Bootstrap, _) => Self::BootstrapFailed { cause },
            (StepKind::Install, _) => Self::DependencyInstallFailed { cause },
            (StepKind::VersionControl, _) => Self::VersionControlInitFailed { cause },
            (StepKind::Structure, _) => Self::StructureFailed { cause },
            // Directory creation and capability-less add-on errors keep their root cause.
            (StepKind::CreateDirectory | StepKind::Addons, _) => *cause,
        }
    }

    fn is_step_failure(&self) -> bool {
        matches!(
            self,
            Self::DirectoryExists { .. }
                | Self::BootstrapFailed { .. }
                | Self::AddonInstallFailed { .. }
                | Self::DependencyInstallFailed { .. }
                | Self::VersionControlInitFailed { .. }
                | Self::StructureFailed { .. }
        )
    }

    /// The innermost error.
    pub fn root_cause(&self) -> &ApplicationError {
        match self {
            Self::BootstrapFailed { cause }
            | Self::AddonInstallFailed { cause, .. }
            | Self::DependencyInstallFailed { cause }
            | Self::VersionControlInitFailed { cause }
            | Self::StructureFailed { cause } => cause.root_cause(),
            other => other,
        }
    }

    /// The pipeline step this error is attributed to, if any.
    pub fn failed_step(&self) -> Option<StepKind> {
        match self {
            Self::DirectoryExists { .. } => Some(StepKind::CreateDirectory),
            Self::BootstrapFailed { .. } => Some(StepKind::Bootstrap),
            Self::AddonInstallFailed { .. } => Some(StepKind::Addons),
            Self::DependencyInstallFailed { .. } => Some(StepKind::Install),
            Self::VersionControlInitFailed { .. } => Some(StepKind::VersionControl),
            Self::StructureFailed { .. } => Some(StepKind::Structure),
            Self::Cancelled { step } => Some(*step),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::BootstrapFailed { cause } => {
                let mut s = vec!["The framework's scaffolding tool failed".into()];
                s.extend(cause.suggestions());
                s.push("Run with --stream to see the tool's full output".into());
                s
            }
            Self::AddonInstallFailed { capability, cause } => {
                let mut s = vec![format!("Setting up {capability} failed")];
                s.extend(cause.suggestions());
                s.push("Retry without that add-on to isolate the problem".into());
                s
            }
            Self::DependencyInstallFailed { cause } => {
                let mut s = vec!["Installing dependencies failed".into()];
                s.extend(cause.suggestions());
                s.push("Pass --no-install and install manually".into());
                s
            }
            Self::VersionControlInitFailed { .. } => vec![
                "Run `git init` inside the project yourself".into(),
                "Check that git has user.name and user.email configured".into(),
            ],
            Self::StructureFailed { cause } => cause.suggestions(),
            Self::PermissionDenied { path, .. } => vec![
                format!("No permission for: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Spawn { command, .. } => vec![
                format!("Could not run: {command}"),
                "Make sure the program is installed and on your PATH".into(),
            ],
            Self::ExternalProcess { command, .. } => vec![
                format!("Command failed: {command}"),
                "Check your network connection and registry access".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Ensure the parent directory exists and is writable".into(),
            ],
            Self::Cancelled { .. } => vec!["The run was interrupted; nothing was kept".into()],
            Self::Unknown { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryExists { .. } => ErrorCategory::Validation,
            Self::PermissionDenied { .. } => ErrorCategory::Validation,
            Self::Spawn { .. } => ErrorCategory::NotFound,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
            Self::BootstrapFailed { cause }
            | Self::AddonInstallFailed { cause, .. }
            | Self::DependencyInstallFailed { cause }
            | Self::VersionControlInitFailed { cause }
            | Self::StructureFailed { cause } => match cause.category() {
                ErrorCategory::NotFound | ErrorCategory::Validation => cause.category(),
                _ => ErrorCategory::External,
            },
            Self::ExternalProcess { .. } => ErrorCategory::External,
            Self::Filesystem { .. } | Self::Unknown { .. } => ErrorCategory::Internal,
        }
    }
}
