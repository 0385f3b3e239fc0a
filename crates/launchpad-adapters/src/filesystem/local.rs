//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use launchpad_core::application::{ApplicationError, ports::Filesystem};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> Result<(), ApplicationError> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file_new(&self, path: &Path, content: &str) -> Result<bool, ApplicationError> {
        // create_new makes the existence check and the write one atomic step.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(map_io_error(path, e, "write file")),
        };
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn list_tree(&self, root: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::Filesystem {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
            if let Ok(relative) = entry.path().strip_prefix(root) {
                entries.push(relative.to_path_buf());
            }
        }
        Ok(entries)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ApplicationError {
    match e.kind() {
        ErrorKind::AlreadyExists => ApplicationError::DirectoryExists {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ApplicationError::PermissionDenied {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        },
        _ => ApplicationError::Filesystem {
            path: path.to_path_buf(),
            reason: format!("Failed to {}: {}", operation, e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_refuses_existing_target() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let target = tmp.path().join("app");

        fs.create_dir(&target).unwrap();
        let err = fs.create_dir(&target).unwrap_err();
        assert_eq!(err, ApplicationError::DirectoryExists { path: target });
    }

    #[test]
    fn create_dir_never_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let target = tmp.path().join("missing").join("app");

        assert!(fs.create_dir(&target).is_err());
        assert!(!tmp.path().join("missing").exists());
    }

    #[test]
    fn write_file_new_keeps_existing_content() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = tmp.path().join("a.txt");

        assert!(fs.write_file_new(&file, "first").unwrap());
        assert!(!fs.write_file_new(&file, "second").unwrap());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "first");
    }

    #[test]
    fn list_tree_is_relative_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&tmp.path().join("b/c")).unwrap();
        fs.write_file_new(&tmp.path().join("a.txt"), "").unwrap();

        let tree = fs.list_tree(tmp.path()).unwrap();
        assert_eq!(
            tree,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b"),
                PathBuf::from("b/c")
            ]
        );
    }
}
