//! Launchpad Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Launchpad, a
//! transactional project creator: it drives each framework's official
//! scaffolding tool, layers add-ons on top, and deletes everything it made
//! if any fatal step fails.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          launchpad-cli (CLI)            │
//! │   (flags, config, signals, progress)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Orchestrator, RollbackManager, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CommandRunner, Filesystem, Progress)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   launchpad-adapters (Infrastructure)   │
//! │  (ProcessRunner, LocalFilesystem, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfiguration, dispatch tables) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use launchpad_core::prelude::*;
//!
//! let config = ProjectConfiguration::builder("my-app", "/home/me/my-app")
//!     .framework(Framework::React)
//!     .styling(Styling::Tailwind)
//!     .build()
//!     .unwrap();
//!
//! let orchestrator = Orchestrator::new(runner, filesystem);
//! let report = orchestrator
//!     .create_project(&config, &CancellationToken::new())
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CancellationToken, Orchestrator, PipelineOptions,
        ports::{CommandRunner, Filesystem, ProgressReporter},
    };
    pub use crate::domain::{
        Capability, ExecutionPlan, Framework, Invocation, Language, OutputMode, PackageManager,
        PipelineReport, PipelineState, ProjectConfiguration, ProjectType, StepKind, Styling,
    };
    pub use crate::error::{LaunchpadError, LaunchpadResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
