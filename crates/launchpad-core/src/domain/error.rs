// ============================================================================
// domain/error.rs - CONFIGURATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the orchestrator records them in reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (rejected before the pipeline starts)
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("framework '{framework}' cannot scaffold a {project_type} project")]
    IncompatibleFramework {
        framework: String,
        project_type: String,
    },

    // ========================================================================
    // Unknown selections (400-level equivalent)
    // ========================================================================
    #[error("Unsupported package manager '{value}'")]
    UnsupportedPackageManager { value: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(msg) => vec![
                "Check your project configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("'{}' must be provided", field),
                "Pass it on the command line or set a default in the config file".into(),
            ],
            Self::IncompatibleFramework {
                framework,
                project_type,
            } => vec![
                format!("'{}' does not produce {} projects", framework, project_type),
                "Omit --type to let the framework decide".into(),
                "Try: launchpad list frameworks".into(),
            ],
            Self::UnsupportedPackageManager { value } => vec![
                format!("'{}' is not a supported package manager", value),
                "Supported package managers: npm, pnpm, yarn, bun".into(),
            ],
            Self::UnknownVariant { kind, value } => vec![
                format!("'{}' is not a known {}", value, kind),
                "Try: launchpad list to see every supported option".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::IncompatibleFramework { .. } => ErrorCategory::Compatibility,
            Self::UnsupportedPackageManager { .. } | Self::UnknownVariant { .. } => {
                ErrorCategory::NotFound
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
}
