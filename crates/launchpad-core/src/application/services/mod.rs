//! Application services - orchestrate use cases.
//!
//! The orchestrator drives the create-project pipeline; rollback and
//! structure enhancement are the two pieces of it that touch the
//! filesystem directly rather than through external tools.

pub mod orchestrator;
pub mod rollback;
pub mod structure_enhancer;

pub use orchestrator::{Orchestrator, PipelineOptions};
pub use rollback::{RollbackManager, RollbackOutcome};
pub use structure_enhancer::FolderStructureEnhancer;
