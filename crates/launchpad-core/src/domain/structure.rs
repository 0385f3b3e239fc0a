//! Folder-structure patterns.
//!
//! Each pattern is a list of directories created beneath `src/`, each
//! seeded with an empty `.gitkeep` so version control keeps it.

use std::path::PathBuf;

use crate::domain::value_objects::FolderStructure;

/// Placeholder written into every created directory.
pub const PLACEHOLDER: &str = ".gitkeep";

/// Directories (relative to `src/`) a pattern adds.
pub const fn directories(pattern: FolderStructure) -> &'static [&'static str] {
    match pattern {
        FolderStructure::Default => &[],
        FolderStructure::FeatureBased => &[
            "features",
            "shared/components",
            "shared/hooks",
            "shared/utils",
            "shared/types",
        ],
        FolderStructure::LayerBased => {
            &["components", "hooks", "services", "utils", "types", "lib"]
        }
        FolderStructure::Atomic => &[
            "components/atoms",
            "components/molecules",
            "components/organisms",
            "components/templates",
            "pages",
        ],
        FolderStructure::DomainDriven => {
            &["domain", "application", "infrastructure", "presentation"]
        }
        FolderStructure::Mvc => &["models", "views", "controllers", "routes", "middleware"],
    }
}

/// A directory to ensure, with its placeholder, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
    pub directory: PathBuf,
    pub placeholder: PathBuf,
}

/// Project-relative entries for a pattern.
pub fn entries(pattern: FolderStructure) -> Vec<StructureEntry> {
    directories(pattern)
        .iter()
        .map(|dir| {
            let directory = PathBuf::from("src").join(dir);
            StructureEntry {
                placeholder: directory.join(PLACEHOLDER),
                directory,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_adds_nothing() {
        assert!(entries(FolderStructure::Default).is_empty());
    }

    #[test]
    fn every_other_pattern_adds_something_under_src() {
        for pattern in FolderStructure::ALL
            .iter()
            .filter(|p| **p != FolderStructure::Default)
        {
            let entries = entries(*pattern);
            assert!(!entries.is_empty(), "{pattern} is empty");
            for entry in entries {
                assert!(entry.directory.starts_with("src"));
                assert!(entry.placeholder.ends_with(PLACEHOLDER));
            }
        }
    }

    #[test]
    fn mvc_layout() {
        let dirs: Vec<_> = entries(FolderStructure::Mvc)
            .into_iter()
            .map(|e| e.directory)
            .collect();
        assert!(dirs.contains(&PathBuf::from("src/controllers")));
    }
}
