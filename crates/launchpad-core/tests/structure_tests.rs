//! Folder-structure enhancement on a real directory.

use std::path::Path;

use launchpad_adapters::LocalFilesystem;
use launchpad_core::{
    application::{Filesystem, FolderStructureEnhancer, RollbackManager, RollbackOutcome},
    domain::FolderStructure,
};
use tempfile::TempDir;

fn bootstrapped(tmp: &TempDir) -> std::path::PathBuf {
    let root = tmp.path().join("app");
    std::fs::create_dir_all(root.join("src/components")).unwrap();
    std::fs::write(root.join("src/main.tsx"), "render(<App />);\n").unwrap();
    std::fs::write(root.join("src/components/App.tsx"), "export {};\n").unwrap();
    root
}

#[test]
fn enhancing_twice_yields_the_same_tree() {
    for pattern in FolderStructure::ALL {
        let tmp = TempDir::new().unwrap();
        let root = bootstrapped(&tmp);
        let fs = LocalFilesystem::new();
        let enhancer = FolderStructureEnhancer::new(&fs);

        enhancer.enhance(&root, *pattern).unwrap();
        let first = fs.list_tree(&root).unwrap();
        let created_again = enhancer.enhance(&root, *pattern).unwrap();
        let second = fs.list_tree(&root).unwrap();

        assert_eq!(first, second, "{pattern}");
        assert_eq!(created_again, 0, "{pattern}");
    }
}

#[test]
fn bootstrap_files_are_never_touched() {
    let tmp = TempDir::new().unwrap();
    let root = bootstrapped(&tmp);
    let fs = LocalFilesystem::new();

    // LayerBased and Atomic both want `src/components`, which already exists.
    for pattern in [FolderStructure::LayerBased, FolderStructure::Atomic] {
        FolderStructureEnhancer::new(&fs)
            .enhance(&root, pattern)
            .unwrap();
    }

    assert_eq!(
        std::fs::read_to_string(root.join("src/main.tsx")).unwrap(),
        "render(<App />);\n"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("src/components/App.tsx")).unwrap(),
        "export {};\n"
    );
    assert!(!root.join("src/components/.gitkeep").exists());
    assert!(root.join("src/components/atoms/.gitkeep").is_file());
    assert!(root.join("src/hooks/.gitkeep").is_file());
}

#[test]
fn default_pattern_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = bootstrapped(&tmp);
    let fs = LocalFilesystem::new();
    let before = fs.list_tree(&root).unwrap();

    let created = FolderStructureEnhancer::new(&fs)
        .enhance(&root, FolderStructure::Default)
        .unwrap();

    assert_eq!(created, 0);
    assert_eq!(fs.list_tree(&root).unwrap(), before);
}

#[test]
fn rollback_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let root = bootstrapped(&tmp);
    let fs = LocalFilesystem::new();
    let rollback = RollbackManager::new(&fs);

    assert_eq!(rollback.rollback(&root), RollbackOutcome::Removed);
    assert_eq!(rollback.rollback(&root), RollbackOutcome::NothingToRemove);
    assert_eq!(
        rollback.rollback(Path::new("/definitely/never/created")),
        RollbackOutcome::NothingToRemove
    );
    assert!(tmp.path().exists());
}
