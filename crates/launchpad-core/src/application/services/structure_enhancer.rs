//! Folder-structure enhancement on top of a bootstrapped skeleton.

use std::path::Path;

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        FolderStructure,
        structure::{self, StructureEntry},
    },
};

/// Adds a pattern's directories beneath `src/`.
///
/// Only ever adds: existing directories are left untouched and no file is
/// overwritten, so running it twice produces the same tree.
pub struct FolderStructureEnhancer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FolderStructureEnhancer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Apply a named pattern. Returns how many directories were created.
    pub fn enhance(&self, root: &Path, pattern: FolderStructure) -> Result<usize, ApplicationError> {
        let created = self.apply(root, &structure::entries(pattern))?;
        debug!(pattern = %pattern, created, "Folder structure applied");
        Ok(created)
    }

    /// Apply already-resolved entries.
    pub fn apply(&self, root: &Path, entries: &[StructureEntry]) -> Result<usize, ApplicationError> {
        let mut created = 0;
        for entry in entries {
            let dir = root.join(&entry.directory);
            if self.filesystem.exists(&dir) {
                debug!(dir = %dir.display(), "Directory already present, leaving it alone");
                continue;
            }
            self.filesystem.create_dir_all(&dir)?;
            self.filesystem
                .write_file_new(&root.join(&entry.placeholder), "")?;
            created += 1;
        }
        Ok(created)
    }
}
