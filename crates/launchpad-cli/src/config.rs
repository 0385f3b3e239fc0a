//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `LAUNCHPAD_` prefix, `__` between sections,
//!    e.g. `LAUNCHPAD_DEFAULTS__PACKAGE_MANAGER=pnpm`
//! 3. Config file (`--config`, or the per-user path)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use launchpad_core::domain::{FolderStructure, Language, PackageManager, Styling};

const ENV_PREFIX: &str = "LAUNCHPAD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub package_manager: PackageManager,
    pub language: Language,
    pub styling: Styling,
    pub folder_structure: FolderStructure,
    pub git: bool,
    pub install: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Npm,
            language: Language::TypeScript,
            styling: Styling::Css,
            folder_structure: FolderStructure::Default,
            git: true,
            install: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file when set.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the file layer and the process environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// per-user file is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(config_file, None)
    }

    /// Like [`Self::load`], reading environment variables from `env` when
    /// given instead of the process environment.
    fn load_from(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration value")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.launchpad.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "launchpad", "launchpad")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".launchpad.toml"))
    }

    /// Look up one value by dotted key, rendered as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        let found = key
            .split('.')
            .try_fold(&value, |node, part| node.get(part))?;
        Some(match found {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}
