//! Rollback of a partially created project.

use std::path::Path;

use tracing::{error, info, instrument};

use crate::application::ports::Filesystem;

/// What a rollback attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    Removed,
    /// The directory was never created or is already gone.
    NothingToRemove,
    /// Deletion failed; logged, never escalated.
    Failed { reason: String },
}

/// Deletes the in-progress project directory.
///
/// Safe to call any number of times, on paths that never existed.
pub struct RollbackManager<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> RollbackManager<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(path = %project_path.display()))]
    pub fn rollback(&self, project_path: &Path) -> RollbackOutcome {
        if !self.filesystem.exists(project_path) {
            return RollbackOutcome::NothingToRemove;
        }

        match self.filesystem.remove_dir_all(project_path) {
            Ok(()) => {
                info!("Rolled back partially created project");
                RollbackOutcome::Removed
            }
            Err(e) => {
                error!(error = %e, "Rollback failed; remove the directory manually");
                RollbackOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
