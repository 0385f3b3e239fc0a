//! Orchestrator - the create-project state machine.
//!
//! Executes an [`ExecutionPlan`] step by step:
//! 1. Create the (empty) project directory
//! 2. Bootstrap the skeleton with the framework's own tool
//! 3. Install add-ons, one capability group at a time
//! 4. Enhance the folder structure
//! 5. Install dependencies
//! 6. Initialize git (the only non-fatal step)
//!
//! From the moment step 1 succeeds, any fatal failure or cancellation
//! deletes the directory before the error is returned.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        cancellation::CancellationToken,
        ports::{CommandRunner, Filesystem, NoopReporter, ProgressReporter},
        services::{
            rollback::{RollbackManager, RollbackOutcome},
            structure_enhancer::FolderStructureEnhancer,
        },
    },
    domain::{
        Capability, ExecutionPlan, Invocation, OutputMode, PipelineReport, PipelineState,
        PlannedStep, ProjectConfiguration, StepKind, StepOutcome, StepWork, SynthesizedFile,
    },
    error::LaunchpadResult,
};

/// Knobs the caller controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// How child-process output is shown.
    pub output_mode: OutputMode,
}

/// Runs the create-project pipeline against injected adapters.
pub struct Orchestrator {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    reporter: Box<dyn ProgressReporter>,
    options: PipelineOptions,
}

impl Orchestrator {
    /// Create an orchestrator with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use launchpad_core::application::{Orchestrator, ports::*};
    ///
    /// let orchestrator = Orchestrator::new(
    ///     runner,     // impl CommandRunner
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(runner: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            runner,
            filesystem,
            reporter: Box::new(NoopReporter),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Create the project, or fail having removed everything it created.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            framework = %config.framework(),
            path = %config.path().display()
        )
    )]
    pub fn create_project(
        &self,
        config: &ProjectConfiguration,
        cancel: &CancellationToken,
    ) -> LaunchpadResult<PipelineReport> {
        config.validate()?;

        let started = Instant::now();
        let run_id = Uuid::new_v4();
        info!(%run_id, "Creating {}", config);

        let plan = ExecutionPlan::for_config(config);
        let mut warnings = Vec::new();
        for note in &plan.notes {
            warn!("{note}");
            warnings.push(note.clone());
        }

        let mut states = Vec::with_capacity(plan.steps.len() + 1);
        let mut invocations = 0;
        let mut directory_created = false;

        for planned in &plan.steps {
            let step = planned.step;
            self.reporter.step_started(step);

            let result = if cancel.is_cancelled() {
                Err(ApplicationError::Cancelled { step })
            } else {
                self.execute(planned, config.path(), cancel, &mut invocations)
            };

            match result {
                Ok(()) => {
                    self.reporter.step_finished(step, &StepOutcome::Completed);
                    states.push(step.reaches());
                    if step == StepKind::CreateDirectory {
                        directory_created = true;
                    }
                    debug!(state = %step.reaches(), "Transition");
                }
                Err(e) if !step.is_fatal() && !e.is_cancelled() => {
                    warn!(error = %e, "{} failed; continuing", step.label());
                    self.reporter
                        .step_finished(step, &StepOutcome::Degraded(e.to_string()));
                    warnings.push(e.to_string());
                }
                Err(e) => {
                    self.reporter
                        .step_finished(step, &StepOutcome::Failed(e.to_string()));
                    warn!(error = %e, step = %step, "Fatal step failed");
                    if directory_created {
                        self.roll_back(config.path());
                    }
                    return Err(e.into());
                }
            }
        }

        states.push(PipelineState::Complete);
        let report = PipelineReport {
            run_id,
            states,
            invocations,
            warnings,
            elapsed: started.elapsed(),
        };
        info!(
            invocations = report.invocations,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Project created"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    #[instrument(skip_all, fields(step = %planned.step))]
    fn execute(
        &self,
        planned: &PlannedStep,
        root: &Path,
        cancel: &CancellationToken,
        count: &mut usize,
    ) -> Result<(), ApplicationError> {
        let step = planned.step;
        info!("{}", step.label());

        match &planned.work {
            StepWork::CreateDirectory { path } => self.filesystem.create_dir(path),
            StepWork::Commands(invocations) => {
                self.run_all(step, None, invocations, cancel, count)
            }
            StepWork::Groups(groups) => {
                for group in groups {
                    debug!(capability = %group.capability, "Installing add-on group");
                    self.run_all(
                        step,
                        Some(group.capability),
                        &group.invocations,
                        cancel,
                        count,
                    )?;
                }
                Ok(())
            }
            StepWork::Files(files) => self
                .write_files(files, root)
                .map_err(|e| e.in_step(step, None)),
            StepWork::Structure(entries) => FolderStructureEnhancer::new(self.filesystem.as_ref())
                .apply(root, entries)
                .map(|_| ())
                .map_err(|e| e.in_step(step, None)),
        }
    }

    fn run_all(
        &self,
        step: StepKind,
        capability: Option<Capability>,
        invocations: &[Invocation],
        cancel: &CancellationToken,
        count: &mut usize,
    ) -> Result<(), ApplicationError> {
        for invocation in invocations {
            if cancel.is_cancelled() {
                return Err(ApplicationError::Cancelled { step });
            }
            self.reporter.invocation_started(invocation);
            debug!(command = %invocation, cwd = %invocation.cwd().display(), "Running");
            *count += 1;

            if let Err(e) = self.runner.run(invocation, self.options.output_mode) {
                // A child killed by the same signal is a cancellation, not a tool failure.
                if cancel.is_cancelled() {
                    return Err(ApplicationError::Cancelled { step });
                }
                return Err(e.in_step(step, capability));
            }
        }
        Ok(())
    }

    fn write_files(&self, files: &[SynthesizedFile], root: &Path) -> Result<(), ApplicationError> {
        for file in files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            if !self.filesystem.write_file_new(&path, &file.content)? {
                return Err(ApplicationError::Filesystem {
                    path,
                    reason: "file already exists".into(),
                });
            }
        }
        Ok(())
    }

    fn roll_back(&self, path: &Path) {
        match RollbackManager::new(self.filesystem.as_ref()).rollback(path) {
            RollbackOutcome::Removed => info!("Removed {}", path.display()),
            RollbackOutcome::NothingToRemove => debug!("Nothing to roll back"),
            RollbackOutcome::Failed { reason } => {
                warn!(%reason, "Could not remove {}", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::application::ports::MockProgressReporter;
    use crate::domain::{ExecutionResult, Framework};

    /// Succeeds for everything except `fail_program`.
    struct StubRunner {
        fail_program: Option<&'static str>,
    }

    impl CommandRunner for StubRunner {
        fn run(
            &self,
            invocation: &Invocation,
            _mode: OutputMode,
        ) -> Result<ExecutionResult, ApplicationError> {
            if Some(invocation.program.as_str()) == self.fail_program {
                return Err(ApplicationError::ExternalProcess {
                    command: invocation.to_string(),
                    exit_code: Some(1),
                });
            }
            Ok(ExecutionResult {
                exit_code: Some(0),
                output: None,
                elapsed: Duration::ZERO,
            })
        }
    }

    #[derive(Default)]
    struct StubFilesystem {
        paths: Mutex<BTreeSet<PathBuf>>,
    }

    impl Filesystem for StubFilesystem {
        fn create_dir(&self, path: &Path) -> Result<(), ApplicationError> {
            let mut paths = self.paths.lock().unwrap();
            if !paths.insert(path.to_path_buf()) {
                return Err(ApplicationError::DirectoryExists {
                    path: path.to_path_buf(),
                });
            }
            Ok(())
        }
        fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
            self.paths.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }
        fn write_file_new(&self, path: &Path, _content: &str) -> Result<bool, ApplicationError> {
            Ok(self.paths.lock().unwrap().insert(path.to_path_buf()))
        }
        fn exists(&self, path: &Path) -> bool {
            self.paths.lock().unwrap().contains(path)
        }
        fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
            self.paths.lock().unwrap().retain(|p| !p.starts_with(path));
            Ok(())
        }
        fn list_tree(&self, root: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
            Ok(self
                .paths
                .lock()
                .unwrap()
                .iter()
                .filter_map(|p| p.strip_prefix(root).ok())
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .collect())
        }
    }

    fn config(git: bool) -> ProjectConfiguration {
        ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::React)
            .git(git)
            .build()
            .unwrap()
    }

    #[test]
    fn reporter_sees_every_visited_step_complete() {
        let mut reporter = MockProgressReporter::new();
        reporter.expect_step_started().times(4).return_const(());
        reporter.expect_invocation_started().times(2).return_const(());
        reporter
            .expect_step_finished()
            .withf(|_, outcome| *outcome == StepOutcome::Completed)
            .times(4)
            .return_const(());

        let orchestrator = Orchestrator::new(
            Box::new(StubRunner { fail_program: None }),
            Box::new(StubFilesystem::default()),
        )
        .with_reporter(Box::new(reporter));

        let report = orchestrator
            .create_project(&config(false), &CancellationToken::new())
            .unwrap();
        assert_eq!(report.invocations, 2);
    }

    #[test]
    fn git_failure_is_reported_as_degraded() {
        let mut reporter = MockProgressReporter::new();
        reporter.expect_step_started().return_const(());
        reporter.expect_invocation_started().return_const(());
        reporter
            .expect_step_finished()
            .withf(|step, outcome| {
                *step == StepKind::VersionControl && matches!(outcome, StepOutcome::Degraded(_))
            })
            .times(1)
            .return_const(());
        reporter
            .expect_step_finished()
            .withf(|step, _| *step != StepKind::VersionControl)
            .return_const(());

        let orchestrator = Orchestrator::new(
            Box::new(StubRunner {
                fail_program: Some("git"),
            }),
            Box::new(StubFilesystem::default()),
        )
        .with_reporter(Box::new(reporter));

        let report = orchestrator
            .create_project(&config(true), &CancellationToken::new())
            .unwrap();
        assert!(!report.visited(PipelineState::VersionControlled));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn pre_cancelled_token_stops_before_creating_anything() {
        let filesystem = StubFilesystem::default();
        let orchestrator = Orchestrator::new(
            Box::new(StubRunner { fail_program: None }),
            Box::new(filesystem),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = orchestrator
            .create_project(&config(false), &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.failed_step(), Some(StepKind::CreateDirectory));
    }
}
