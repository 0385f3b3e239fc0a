//! Error handling for the Launchpad CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - A rollback status line for failed runs
//! - Exit code mapping

use std::error::Error;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use launchpad_core::domain::StepKind;
use launchpad_core::error::{ErrorCategory as CoreCategory, LaunchpadError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// The project name could not be derived from the given path.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Pre-flight: the target directory is already there.
    #[error("Project directory already exists: {}", path.display())]
    ProjectExists { path: PathBuf },

    /// Pre-flight: the parent of the target directory is missing.
    #[error("Parent directory does not exist: {}", path.display())]
    ParentMissing { path: PathBuf },

    /// Pre-flight: a required executable is not on PATH.
    #[error("'{tool}' was not found on PATH")]
    ToolMissing { tool: String, hint: &'static str },

    /// The configuration could not be built or validated.
    #[error(transparent)]
    Core(#[from] LaunchpadError),

    /// A pipeline run failed after it started touching the filesystem.
    #[error("{error}")]
    Pipeline {
        error: LaunchpadError,
        path: PathBuf,
        /// Whether the project directory is gone after the failure.
        removed: bool,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{}' cannot be used: {}", name, reason),
                "Use lowercase letters, digits, '-', '_' or '.'".into(),
                "Examples: my-app, shop_api, web.client".into(),
            ],

            Self::ProjectExists { path } => vec![
                "Launchpad never writes into an existing directory".into(),
                "Choose a different project name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],

            Self::ParentMissing { path } => vec![
                format!("Create it first: mkdir -p {}", path.display()),
                "Launchpad only creates the project directory itself".into(),
            ],

            Self::ToolMissing { tool, hint } => vec![
                format!("Install {} and make sure it is on your PATH", tool),
                (*hint).to_string(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::Pipeline {
                error,
                path,
                removed,
            } => {
                let mut out = error.suggestions();
                if let Some(status) = rollback_status(error, path, *removed) {
                    out.push(status);
                }
                out
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file shown by: launchpad config path".into(),
                "Check LAUNCHPAD_* environment variables".into(),
                "Recreate a default file with: launchpad init --force".into(),
            ],

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec!["Nothing was created".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::ProjectExists { .. }
            | Self::ParentMissing { .. } => ErrorCategory::UserError,
            Self::ToolMissing { .. } => ErrorCategory::NotFound,
            Self::Core(core) | Self::Pipeline { error: core, .. } => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Cancelled => ErrorCategory::Interrupted,
                CoreCategory::External | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Interrupted   | 130  |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Interrupted => 130,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.cause();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.cause();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// First error below the one shown in the header.
    ///
    /// A pipeline failure displays its core error, so the chain starts
    /// beneath it.
    fn cause(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pipeline { error, .. } => error.source(),
            other => other.source(),
        }
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Interrupted => tracing::warn!("Interrupted: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.cause() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// The line telling the user what happened to the half-built project.
///
/// `None` when the run never created the directory.
fn rollback_status(error: &LaunchpadError, path: &Path, removed: bool) -> Option<String> {
    let step = error.failed_step()?;
    if step == StepKind::CreateDirectory {
        return None;
    }
    Some(if removed {
        format!("Rolled back: {} was removed", path.display())
    } else {
        format!(
            "Rollback incomplete: remove {} manually before retrying",
            path.display()
        )
    })
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource or tool not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// A termination signal (SIGINT, SIGTERM, SIGHUP) during a run.
    Interrupted,
    /// Internal, system or external tool error.
    Internal,
}
