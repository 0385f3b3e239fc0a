//! The full, ordered plan a configuration resolves to.
//!
//! The orchestrator executes exactly this plan, and `--dry-run` prints it,
//! so what a user previews is what runs.

use std::path::PathBuf;

use crate::domain::{
    addons::{self, AddonDispatcher, InvocationGroup},
    bootstrap::{BootstrapAction, BootstrapDispatcher, SynthesizedFile},
    configuration::ProjectConfiguration,
    invocation::{CommandLine, Invocation},
    pipeline::{PipelineState, StepKind},
    structure::{self, StructureEntry},
};

/// Commit message for the initial commit.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from launchpad";

/// What one step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepWork {
    CreateDirectory { path: PathBuf },
    Commands(Vec<Invocation>),
    Files(Vec<SynthesizedFile>),
    Groups(Vec<InvocationGroup>),
    Structure(Vec<StructureEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: StepKind,
    pub work: StepWork,
}

impl PlannedStep {
    /// External commands this step runs, in order.
    pub fn invocations(&self) -> Vec<&Invocation> {
        match &self.work {
            StepWork::Commands(invocations) => invocations.iter().collect(),
            StepWork::Groups(groups) => groups.iter().flat_map(|g| &g.invocations).collect(),
            StepWork::CreateDirectory { .. } | StepWork::Files(_) | StepWork::Structure(_) => {
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub steps: Vec<PlannedStep>,
    /// Degraded choices, to be logged as warnings.
    pub notes: Vec<String>,
}

impl ExecutionPlan {
    pub fn for_config(config: &ProjectConfiguration) -> Self {
        let root = config.path();
        let mut notes = Vec::new();
        let mut steps = vec![PlannedStep {
            step: StepKind::CreateDirectory,
            work: StepWork::CreateDirectory {
                path: root.to_path_buf(),
            },
        }];

        let bootstrap = BootstrapDispatcher::plan(config);
        notes.extend(bootstrap.notes);
        steps.push(PlannedStep {
            step: StepKind::Bootstrap,
            work: match bootstrap.action {
                BootstrapAction::Tool(invocations) => StepWork::Commands(invocations),
                BootstrapAction::Synthesized(files) => StepWork::Files(files),
            },
        });

        if addons::any_selected(config) {
            let addons = AddonDispatcher::plan(config);
            notes.extend(addons.notes);
            steps.push(PlannedStep {
                step: StepKind::Addons,
                work: StepWork::Groups(addons.groups),
            });
        } else {
            // Database without an ORM still deserves its note.
            notes.extend(AddonDispatcher::plan(config).notes);
        }

        steps.push(PlannedStep {
            step: StepKind::Structure,
            work: StepWork::Structure(structure::entries(config.folder_structure())),
        });

        let install = if config.install() {
            vec![config.package_manager().install_all().in_dir(root)]
        } else {
            Vec::new()
        };
        steps.push(PlannedStep {
            step: StepKind::Install,
            work: StepWork::Commands(install),
        });

        if config.git() {
            steps.push(PlannedStep {
                step: StepKind::VersionControl,
                work: StepWork::Commands(vec![
                    CommandLine::new("git").arg("init").in_dir(root),
                    CommandLine::new("git").args(["add", "-A"]).in_dir(root),
                    CommandLine::new("git")
                        .args(["commit", "-m", INITIAL_COMMIT_MESSAGE])
                        .in_dir(root),
                ]),
            });
        }

        Self { steps, notes }
    }

    pub fn step(&self, step: StepKind) -> Option<&PlannedStep> {
        self.steps.iter().find(|s| s.step == step)
    }

    pub fn invocations(&self) -> Vec<&Invocation> {
        self.steps.iter().flat_map(PlannedStep::invocations).collect()
    }

    /// States a fully successful run visits.
    pub fn expected_states(&self) -> Vec<PipelineState> {
        self.steps
            .iter()
            .map(|s| s.step.reaches())
            .chain(std::iter::once(PipelineState::Complete))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Database, Framework, Styling};

    fn builder() -> crate::domain::configuration::ConfigurationBuilder {
        ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::React)
    }

    #[test]
    fn minimal_plan_skips_addons_and_git() {
        let cfg = builder().git(false).build().unwrap();
        let plan = ExecutionPlan::for_config(&cfg);
        assert_eq!(
            plan.expected_states(),
            vec![
                PipelineState::DirectoryCreated,
                PipelineState::Bootstrapped,
                PipelineState::StructureEnhanced,
                PipelineState::DependenciesInstalled,
                PipelineState::Complete,
            ]
        );
        assert_eq!(plan.invocations().len(), 2);
    }

    #[test]
    fn styling_only_adds_the_addon_step() {
        let cfg = builder().styling(Styling::Scss).build().unwrap();
        let plan = ExecutionPlan::for_config(&cfg);
        let StepWork::Groups(groups) = &plan.step(StepKind::Addons).unwrap().work else {
            panic!("add-on step must carry groups");
        };
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn no_install_keeps_the_step_but_runs_nothing() {
        let cfg = builder().install(false).build().unwrap();
        let plan = ExecutionPlan::for_config(&cfg);
        assert!(plan.step(StepKind::Install).unwrap().invocations().is_empty());
    }

    #[test]
    fn git_step_commits_with_fixed_message() {
        let cfg = builder().build().unwrap();
        let plan = ExecutionPlan::for_config(&cfg);
        let git = plan.step(StepKind::VersionControl).unwrap().invocations();
        assert_eq!(git.len(), 3);
        assert!(git[2].has_arg(INITIAL_COMMIT_MESSAGE));
    }

    #[test]
    fn database_without_orm_note_survives_skipped_addons() {
        let cfg = builder().database(Some(Database::Sqlite)).build().unwrap();
        let plan = ExecutionPlan::for_config(&cfg);
        assert!(plan.step(StepKind::Addons).is_none());
        assert_eq!(plan.notes.len(), 1);
    }
}
