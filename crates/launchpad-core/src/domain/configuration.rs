//! The `ProjectConfiguration` aggregate and its builder.
//!
//! A `ProjectConfiguration` is the fully-resolved, validated description of
//! the project the user wants. Once built it is never mutated: the
//! orchestrator and every dispatcher only read it.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    capabilities,
    error::DomainError,
    package_manager::PackageManager,
    value_objects::{
        Auth, Database, ExtraLibrary, FolderStructure, Framework, Language, Orm, ProjectType,
        StateManagement, Styling, TestFramework, UiLibrary,
    },
};

/// Default path alias handed to tools that support one.
pub const DEFAULT_IMPORT_ALIAS: &str = "@/*";

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated project configuration.
///
/// Guarantees on construction:
/// - `name` is a usable directory and package name
/// - `path` is absolute and ends in `name`
/// - `framework` scaffolds `project_type`
/// - `testing` and `extras` hold no duplicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfiguration {
    name: String,
    path: PathBuf,
    project_type: ProjectType,
    framework: Framework,
    language: Language,
    package_manager: PackageManager,
    styling: Styling,
    state_management: Option<StateManagement>,
    ui_library: Option<UiLibrary>,
    orm: Option<Orm>,
    database: Option<Database>,
    auth: Option<Auth>,
    testing: Vec<TestFramework>,
    extras: Vec<ExtraLibrary>,
    folder_structure: FolderStructure,
    import_alias: String,
    src_dir: bool,
    git: bool,
    install: bool,
}

impl ProjectConfiguration {
    /// Start building a configuration for `name`, created at `path`.
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> ConfigurationBuilder {
        ConfigurationBuilder::new(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }
    pub const fn framework(&self) -> Framework {
        self.framework
    }
    pub const fn language(&self) -> Language {
        self.language
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn styling(&self) -> Styling {
        self.styling
    }
    pub const fn state_management(&self) -> Option<StateManagement> {
        self.state_management
    }
    pub const fn ui_library(&self) -> Option<UiLibrary> {
        self.ui_library
    }
    pub const fn orm(&self) -> Option<Orm> {
        self.orm
    }
    pub const fn database(&self) -> Option<Database> {
        self.database
    }
    pub const fn auth(&self) -> Option<Auth> {
        self.auth
    }
    pub fn testing(&self) -> &[TestFramework] {
        &self.testing
    }
    pub fn extras(&self) -> &[ExtraLibrary] {
        &self.extras
    }
    pub const fn folder_structure(&self) -> FolderStructure {
        self.folder_structure
    }
    pub fn import_alias(&self) -> &str {
        &self.import_alias
    }
    pub const fn src_dir(&self) -> bool {
        self.src_dir
    }
    pub const fn git(&self) -> bool {
        self.git
    }
    pub const fn install(&self) -> bool {
        self.install
    }

    /// The language the bootstrap tool will really emit.
    ///
    /// Differs from [`Self::language`] when the framework's tool does not
    /// support the requested one (Angular is TypeScript-only).
    pub fn effective_language(&self) -> Language {
        capabilities::effective_language(self.framework, self.language)
    }

    /// Validate internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// deserialization or external construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;

        if !self.path.is_absolute() {
            return Err(DomainError::Validation(format!(
                "target path '{}' must be absolute",
                self.path.display()
            )));
        }
        if self.path.file_name().and_then(|n| n.to_str()) != Some(self.name.as_str()) {
            return Err(DomainError::Validation(format!(
                "target path '{}' must end in the project name '{}'",
                self.path.display(),
                self.name
            )));
        }

        if capabilities::validate_framework_type(self.framework, self.project_type).is_err() {
            return Err(DomainError::IncompatibleFramework {
                framework: self.framework.to_string(),
                project_type: self.project_type.to_string(),
            });
        }

        if !self.import_alias.ends_with("/*") || self.import_alias.len() < 3 {
            return Err(DomainError::Validation(format!(
                "import alias '{}' must look like '@/*'",
                self.import_alias
            )));
        }

        Ok(())
    }
}

impl fmt::Display for ProjectConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} / {} / {})",
            self.name, self.project_type, self.framework, self.language, self.package_manager
        )
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::MissingRequiredField { field: "name" });
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err(DomainError::Validation(format!(
            "project name '{name}' cannot start with '.' or '_'"
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(DomainError::Validation(format!(
            "project name '{name}' contains '{bad}'; use letters, digits, '-', '_' or '.'"
        )));
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(format!(
            "project name '{name}' must be lowercase to be a valid package name"
        )));
    }
    Ok(())
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfiguration`].
///
/// Inference at `build()`:
/// - framework but no type: the framework's registered type
/// - type but no framework: the type's default framework
/// - neither: error
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    name: String,
    path: PathBuf,
    project_type: Option<ProjectType>,
    framework: Option<Framework>,
    language: Language,
    package_manager: PackageManager,
    styling: Styling,
    state_management: Option<StateManagement>,
    ui_library: Option<UiLibrary>,
    orm: Option<Orm>,
    database: Option<Database>,
    auth: Option<Auth>,
    testing: Vec<TestFramework>,
    extras: Vec<ExtraLibrary>,
    folder_structure: FolderStructure,
    import_alias: String,
    src_dir: bool,
    git: bool,
    install: bool,
}

impl ConfigurationBuilder {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            project_type: None,
            framework: None,
            language: Language::TypeScript,
            package_manager: PackageManager::Npm,
            styling: Styling::Css,
            state_management: None,
            ui_library: None,
            orm: None,
            database: None,
            auth: None,
            testing: Vec::new(),
            extras: Vec::new(),
            folder_structure: FolderStructure::Default,
            import_alias: DEFAULT_IMPORT_ALIAS.to_string(),
            src_dir: true,
            git: true,
            install: true,
        }
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    pub fn state_management(mut self, state: Option<StateManagement>) -> Self {
        self.state_management = state;
        self
    }

    pub fn ui_library(mut self, ui: Option<UiLibrary>) -> Self {
        self.ui_library = ui;
        self
    }

    pub fn orm(mut self, orm: Option<Orm>) -> Self {
        self.orm = orm;
        self
    }

    pub fn database(mut self, database: Option<Database>) -> Self {
        self.database = database;
        self
    }

    pub fn auth(mut self, auth: Option<Auth>) -> Self {
        self.auth = auth;
        self
    }

    pub fn testing(mut self, testing: impl IntoIterator<Item = TestFramework>) -> Self {
        self.testing = testing.into_iter().collect();
        self
    }

    pub fn extras(mut self, extras: impl IntoIterator<Item = ExtraLibrary>) -> Self {
        self.extras = extras.into_iter().collect();
        self
    }

    pub fn folder_structure(mut self, structure: FolderStructure) -> Self {
        self.folder_structure = structure;
        self
    }

    pub fn import_alias(mut self, alias: impl Into<String>) -> Self {
        self.import_alias = alias.into();
        self
    }

    pub fn src_dir(mut self, src_dir: bool) -> Self {
        self.src_dir = src_dir;
        self
    }

    pub fn git(mut self, git: bool) -> Self {
        self.git = git;
        self
    }

    pub fn install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    /// Resolve inference, de-duplicate lists, and validate.
    pub fn build(self) -> Result<ProjectConfiguration, DomainError> {
        let (project_type, framework) = match (self.project_type, self.framework) {
            (Some(t), Some(f)) => (t, f),
            (None, Some(f)) => (f.project_type(), f),
            (Some(t), None) => (t, capabilities::default_framework(t)),
            (None, None) => return Err(DomainError::MissingRequiredField { field: "framework" }),
        };

        let config = ProjectConfiguration {
            name: self.name,
            path: self.path,
            project_type,
            framework,
            language: self.language,
            package_manager: self.package_manager,
            styling: self.styling,
            state_management: self.state_management,
            ui_library: self.ui_library,
            orm: self.orm,
            database: self.database,
            auth: self.auth,
            testing: dedup(self.testing),
            extras: dedup(self.extras),
            folder_structure: self.folder_structure,
            import_alias: self.import_alias,
            src_dir: self.src_dir,
            git: self.git,
            install: self.install,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Remove repeats, keeping first occurrence order.
fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        std::env::temp_dir().join("my-app")
    }

    #[test]
    fn framework_infers_type() {
        let cfg = ProjectConfiguration::builder("my-app", root())
            .framework(Framework::Nuxt)
            .build()
            .unwrap();
        assert_eq!(cfg.project_type(), ProjectType::Fullstack);
    }

    #[test]
    fn type_infers_default_framework() {
        let cfg = ProjectConfiguration::builder("my-app", root())
            .project_type(ProjectType::Backend)
            .build()
            .unwrap();
        assert_eq!(cfg.framework(), Framework::Express);
    }

    #[test]
    fn neither_type_nor_framework_is_an_error() {
        let err = ProjectConfiguration::builder("my-app", root())
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "framework" });
    }

    #[test]
    fn mismatched_framework_and_type_is_rejected() {
        let err = ProjectConfiguration::builder("my-app", root())
            .project_type(ProjectType::Backend)
            .framework(Framework::React)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompatibleFramework { .. }));
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = ProjectConfiguration::builder("my-app", "my-app")
            .framework(Framework::React)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn path_must_end_in_name() {
        let err = ProjectConfiguration::builder("my-app", std::env::temp_dir().join("other"))
            .framework(Framework::React)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn bad_names_are_rejected() {
        for name in ["", ".hidden", "_private", "My-App", "a b", "a/b"] {
            assert!(validate_name(name).is_err(), "accepted {name:?}");
        }
        for name in ["my-app", "app2", "my_app", "my.app"] {
            assert!(validate_name(name).is_ok(), "rejected {name:?}");
        }
    }

    #[test]
    fn lists_are_deduplicated_in_order() {
        let cfg = ProjectConfiguration::builder("my-app", root())
            .framework(Framework::React)
            .testing([
                TestFramework::Vitest,
                TestFramework::Playwright,
                TestFramework::Vitest,
            ])
            .build()
            .unwrap();
        assert_eq!(
            cfg.testing(),
            &[TestFramework::Vitest, TestFramework::Playwright]
        );
    }

    #[test]
    fn import_alias_shape_is_checked() {
        let err = ProjectConfiguration::builder("my-app", root())
            .framework(Framework::NextJs)
            .import_alias("@")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn effective_language_reflects_tool_support() {
        let cfg = ProjectConfiguration::builder("my-app", root())
            .framework(Framework::Angular)
            .language(Language::JavaScript)
            .build()
            .unwrap();
        assert_eq!(cfg.language(), Language::JavaScript);
        assert_eq!(cfg.effective_language(), Language::TypeScript);
    }
}
