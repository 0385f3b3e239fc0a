//! Pipeline states, steps and the run report.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

/// Where a run is. Transitions are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineState {
    NotStarted,
    DirectoryCreated,
    Bootstrapped,
    AddonsInstalled,
    StructureEnhanced,
    DependenciesInstalled,
    VersionControlled,
    Complete,
    /// Terminal: the project directory was removed after a failure.
    RolledBack,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::DirectoryCreated => "directory created",
            Self::Bootstrapped => "bootstrapped",
            Self::AddonsInstalled => "add-ons installed",
            Self::StructureEnhanced => "structure enhanced",
            Self::DependenciesInstalled => "dependencies installed",
            Self::VersionControlled => "version controlled",
            Self::Complete => "complete",
            Self::RolledBack => "rolled back",
        };
        f.write_str(s)
    }
}

/// A named unit of pipeline work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    CreateDirectory,
    Bootstrap,
    Addons,
    Structure,
    Install,
    VersionControl,
}

impl StepKind {
    pub const ALL: [Self; 6] = [
        Self::CreateDirectory,
        Self::Bootstrap,
        Self::Addons,
        Self::Structure,
        Self::Install,
        Self::VersionControl,
    ];

    /// Whether failing this step rolls the whole run back.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::VersionControl)
    }

    /// The state reached when this step succeeds.
    pub const fn reaches(&self) -> PipelineState {
        match self {
            Self::CreateDirectory => PipelineState::DirectoryCreated,
            Self::Bootstrap => PipelineState::Bootstrapped,
            Self::Addons => PipelineState::AddonsInstalled,
            Self::Structure => PipelineState::StructureEnhanced,
            Self::Install => PipelineState::DependenciesInstalled,
            Self::VersionControl => PipelineState::VersionControlled,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreateDirectory => "Creating project directory",
            Self::Bootstrap => "Bootstrapping skeleton",
            Self::Addons => "Installing add-ons",
            Self::Structure => "Enhancing folder structure",
            Self::Install => "Installing dependencies",
            Self::VersionControl => "Initializing git repository",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CreateDirectory => "create-directory",
            Self::Bootstrap => "bootstrap",
            Self::Addons => "addons",
            Self::Structure => "structure",
            Self::Install => "install",
            Self::VersionControl => "version-control",
        };
        f.write_str(s)
    }
}

/// How a step ended, as reported to progress observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// Non-fatal failure; the run continues.
    Degraded(String),
    Failed(String),
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    /// States visited in order, ending in `Complete`.
    pub states: Vec<PipelineState>,
    /// External commands executed.
    pub invocations: usize,
    /// Degraded choices and non-fatal failures.
    pub warnings: Vec<String>,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn visited(&self, state: PipelineState) -> bool {
        self.states.contains(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_version_control_is_non_fatal() {
        let non_fatal: Vec<_> = StepKind::ALL.iter().filter(|s| !s.is_fatal()).collect();
        assert_eq!(non_fatal, vec![&StepKind::VersionControl]);
    }

    #[test]
    fn steps_reach_states_in_order() {
        let states: Vec<_> = StepKind::ALL.iter().map(|s| s.reaches()).collect();
        let mut sorted = states.clone();
        sorted.sort();
        assert_eq!(states, sorted);
        assert!(states.iter().all(|s| *s < PipelineState::Complete));
    }
}
