//! Package-manager command table.
//!
//! Every other dispatcher builds install / add / run-binary commands through
//! this module and nowhere else. The most common bug class in a
//! multi-manager scaffolder is one manager's convention (`npx`) leaking into
//! code that is supposed to be manager-agnostic; routing everything through
//! these three functions makes that impossible to write by accident.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, invocation::CommandLine};

/// A supported JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: &'static [Self] = &[Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// The executable that must be on `PATH` for this manager.
    pub const fn executable(&self) -> &'static str {
        self.as_str()
    }

    /// Install every dependency listed in the manifest.
    pub fn install_all(self) -> CommandLine {
        CommandLine::new(self.as_str()).arg("install")
    }

    /// Add packages to the manifest (and install them).
    pub fn add_packages<I, S>(self, packages: I, dev: bool) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = match self {
            Self::Npm => CommandLine::new("npm").arg("install"),
            Self::Pnpm => CommandLine::new("pnpm").arg("add"),
            Self::Yarn => CommandLine::new("yarn").arg("add"),
            Self::Bun => CommandLine::new("bun").arg("add"),
        };
        let cmd = match (self, dev) {
            (_, false) => cmd,
            (Self::Npm | Self::Pnpm, true) => cmd.arg("--save-dev"),
            (Self::Yarn | Self::Bun, true) => cmd.arg("--dev"),
        };
        cmd.args(packages)
    }

    /// Run a package's binary on demand without adding it to the project.
    ///
    /// `package` may carry a version (`create-vite@6.1.1`). npm is given
    /// `--yes` so it never asks before downloading.
    pub fn run_binary<I, S>(self, package: &str, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = match self {
            Self::Npm => CommandLine::new("npx").arg("--yes"),
            Self::Pnpm => CommandLine::new("pnpm").arg("dlx"),
            Self::Yarn => CommandLine::new("yarn").arg("dlx"),
            Self::Bun => CommandLine::new("bunx"),
        };
        cmd.arg(package).args(args)
    }

    /// Run a binary that lives in another package (`npx -p pkg bin`).
    ///
    /// Needed when the executable name differs from the package name, as
    /// with `@angular/cli` (`ng`) and `@nestjs/cli` (`nest`).
    pub fn run_package_binary<I, S>(self, package: &str, binary: &str, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = match self {
            Self::Npm => CommandLine::new("npx")
                .arg("--yes")
                .arg("--package")
                .arg(package),
            Self::Pnpm => CommandLine::new("pnpm").arg("--package").arg(package).arg("dlx"),
            Self::Yarn => CommandLine::new("yarn").arg("dlx").arg("--package").arg(package),
            Self::Bun => CommandLine::new("bunx").arg("--package").arg(package),
        };
        cmd.arg(binary).args(args)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            _ => Err(DomainError::UnsupportedPackageManager {
                value: s.to_string(),
            }),
        }
    }
}
