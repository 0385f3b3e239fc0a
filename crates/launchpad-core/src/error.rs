//! Unified error handling for Launchpad Core.
//!
//! Wraps domain and application errors behind one type with
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, StepKind};

/// Root error type for Launchpad Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchpadError {
    /// The configuration is invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A pipeline step failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LaunchpadError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file and LAUNCHPAD_* environment variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Launchpad".into(),
                "Please report it with the output of `launchpad -vv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The pipeline step that failed, when the error came from a run.
    pub fn failed_step(&self) -> Option<StepKind> {
        match self {
            Self::Application(e) => e.failed_step(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_cancelled())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    /// An external tool failed.
    External,
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type LaunchpadResult<T> = Result<T, LaunchpadError>;
