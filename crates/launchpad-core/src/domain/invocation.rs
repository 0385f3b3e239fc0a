//! Structured external commands.
//!
//! Every external tool the pipeline touches is described by an
//! [`Invocation`]: program, argument vector, working directory and
//! environment overrides. Nothing is ever concatenated into a shell string;
//! the `Display` impl exists for logs and `--dry-run` only.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// Environment applied to every child process.
///
/// Tools that would otherwise prompt detect CI and take their defaults;
/// telemetry banners that wait for input are switched off.
pub const NON_INTERACTIVE_ENV: &[(&str, &str)] = &[
    ("CI", "true"),
    ("npm_config_yes", "true"),
    ("NEXT_TELEMETRY_DISABLED", "1"),
    ("NUXT_TELEMETRY_DISABLED", "1"),
    ("ASTRO_TELEMETRY_DISABLED", "1"),
    ("DO_NOT_TRACK", "1"),
];

/// A program and its arguments, not yet bound to a directory.
///
/// This is what the package-manager table hands out; dispatchers bind it to
/// the project directory with [`CommandLine::in_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bind to a working directory.
    pub fn in_dir(self, cwd: impl Into<PathBuf>) -> Invocation {
        Invocation {
            program: self.program,
            args: self.args,
            cwd: cwd.into(),
            env: BTreeMap::new(),
        }
    }
}

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Overrides layered on top of [`NON_INTERACTIVE_ENV`].
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The complete environment the child will see on top of the parent's.
    pub fn effective_env(&self) -> BTreeMap<String, String> {
        let mut env: BTreeMap<String, String> = NON_INTERACTIVE_ENV
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        env.extend(self.env.clone());
        env
    }

    /// Whether any argument contains `needle` (used by tests and plan checks).
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How a child process's output is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Stream stdout and stderr to the user's terminal.
    #[default]
    Inherit,
    /// Drop stdout, keep stderr so failures stay visible.
    Quiet,
    /// Pipe and return both streams. Never used by mutating steps.
    Capture,
}

/// What happened when an invocation ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: Option<i32>,
    /// Captured stdout; only populated in [`OutputMode::Capture`].
    pub output: Option<String>,
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
