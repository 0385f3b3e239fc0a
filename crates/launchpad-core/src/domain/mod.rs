//! Core domain layer for Launchpad.
//!
//! Pure logic with no I/O: the configuration aggregate, the value enums,
//! and every dispatch table that turns a configuration into external
//! commands. Running those commands is the application layer's job,
//! through the ports it defines.
//!
//! ## Rules
//!
//! - **No I/O**: no filesystem, process, or network access
//! - **No tracing**: degraded choices are returned as notes for the caller to log
//! - **Immutable inputs**: dispatchers only read a `ProjectConfiguration`
//! - **Tables over branches**: framework, styling and database facts live in registries

pub mod addons;
pub mod bootstrap;
pub mod capabilities;
pub mod configuration;
pub mod error;
pub mod invocation;
pub mod package_manager;
pub mod pipeline;
pub mod plan;
pub mod structure;
pub mod value_objects;

pub use addons::{AddonDispatcher, AddonPlan, Capability, DatabaseBinding, InvocationGroup};
pub use bootstrap::{BootstrapAction, BootstrapDispatcher, BootstrapPlan, SynthesizedFile};
pub use configuration::{ConfigurationBuilder, ProjectConfiguration};
pub use error::{DomainError, ErrorCategory};
pub use invocation::{CommandLine, ExecutionResult, Invocation, OutputMode};
pub use package_manager::PackageManager;
pub use pipeline::{PipelineReport, PipelineState, StepKind, StepOutcome};
pub use plan::{ExecutionPlan, PlannedStep, StepWork};
pub use value_objects::{
    Auth, Database, ExtraLibrary, FolderStructure, Framework, Language, Orm, ProjectType,
    StateManagement, Styling, TestFramework, UiLibrary,
};
