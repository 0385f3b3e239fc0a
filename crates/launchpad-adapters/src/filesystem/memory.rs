//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use launchpad_core::application::{ApplicationError, ports::Filesystem};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after boxing one into
/// the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Paths whose removal fails, to exercise rollback failure.
    undeletable: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem where `dirs` (and their ancestors) already exist.
    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let fs = Self::new();
        for dir in dirs {
            let _ = fs.create_dir_all(dir.as_ref());
        }
        fs
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.inner.read().ok()?.files.get(path).cloned()
    }

    /// Make `remove_dir_all` fail for `path`.
    pub fn make_undeletable(&self, path: &Path) {
        if let Ok(mut inner) = self.inner.write() {
            inner.undeletable.insert(path.to_path_buf());
        }
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryFilesystemInner>, ApplicationError> {
        self.inner
            .read()
            .map_err(|e| poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryFilesystemInner>, ApplicationError> {
        self.inner
            .write()
            .map_err(|e| poisoned(e.to_string()))
    }
}

fn poisoned(reason: String) -> ApplicationError {
    ApplicationError::unknown("memory filesystem lock poisoned", io::Error::other(reason))
}

impl MemoryFilesystemInner {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.write()?;
        if inner.exists(path) {
            return Err(ApplicationError::DirectoryExists {
                path: path.to_path_buf(),
            });
        }
        if !inner.parent_exists(path) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            });
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::Filesystem {
                    path: current,
                    reason: "A file is in the way".into(),
                });
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file_new(&self, path: &Path, content: &str) -> Result<bool, ApplicationError> {
        let mut inner = self.write()?;
        if inner.exists(path) {
            return Ok(false);
        }
        if !inner.parent_exists(path) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            });
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.exists(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.write()?;

        if inner.undeletable.contains(path) {
            return Err(ApplicationError::PermissionDenied {
                path: path.to_path_buf(),
                operation: "remove directory".into(),
            });
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn list_tree(&self, root: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        let inner = self.read()?;
        let mut entries: Vec<PathBuf> = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| *p != root)
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .collect();
        entries.sort();
        Ok(entries)
    }
}
