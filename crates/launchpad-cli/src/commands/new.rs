//! Implementation of the `launchpad new` command.
//!
//! Responsibility: turn flags and config defaults into a
//! `ProjectConfiguration`, check the machine can run the plan, and hand the
//! run to the core orchestrator.  No dispatch decisions live here.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, instrument};

use launchpad_adapters::{LocalFilesystem, ProcessRunner};
use launchpad_core::{
    application::{CancellationToken, NoopReporter, Orchestrator, PipelineOptions, ProgressReporter},
    domain::{
        ExecutionPlan, OutputMode, PipelineReport, ProjectConfiguration, ProjectType, StepKind,
        StepWork,
    },
    error::LaunchpadError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::{AppConfig, Defaults},
    error::{CliError, CliResult},
    output::OutputManager,
    progress::{LineReporter, SpinnerReporter},
    signals::SignalScope,
};

/// Execute the `launchpad new` command.
///
/// Dispatch sequence:
/// 1. Resolve the project path and build the configuration
/// 2. `--dry-run`: print the plan and stop
/// 3. Pre-flight checks (target, parent, tools on PATH)
/// 4. Confirm with the user unless `--yes` or `--quiet`
/// 5. Run the pipeline with termination signals routed to its cancellation token
/// 6. Print the report and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: OutputManager,
    signals: &SignalScope,
) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let (name, path) = resolve_project_path(&args.name, &cwd)?;
    let project = build_configuration(&args, &config.defaults, name, path)?;
    let plan = ExecutionPlan::for_config(&project);

    debug!(
        framework = %project.framework(),
        project_type = %project.project_type(),
        package_manager = %project.package_manager(),
        steps = plan.steps.len(),
        "Configuration resolved"
    );

    if args.dry_run {
        return print_plan(&project, &plan, &output);
    }

    preflight(&project, &plan)?;

    if !global.quiet && !args.yes {
        show_configuration(&project, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let cancel = CancellationToken::new();
    let _armed = signals.arm(&cancel);

    let output_mode = if args.stream {
        OutputMode::Inherit
    } else {
        OutputMode::Quiet
    };
    let reporter = reporter_for(&output, args.stream);
    let orchestrator = Orchestrator::new(
        Box::new(ProcessRunner::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_reporter(reporter)
    .with_options(PipelineOptions { output_mode });

    output.header(&format!("Creating '{}'...", project.name()))?;
    info!(path = %project.path().display(), "Pipeline started");

    match orchestrator.create_project(&project, &cancel) {
        Ok(report) => print_report(&project, &report, &output),
        Err(error) => Err(pipeline_error(error, project.path())),
    }
}

fn pipeline_error(error: LaunchpadError, path: &Path) -> CliError {
    CliError::Pipeline {
        error,
        path: path.to_path_buf(),
        removed: !path.exists(),
    }
}

fn reporter_for(output: &OutputManager, stream: bool) -> Box<dyn ProgressReporter> {
    if output.is_quiet() {
        Box::new(NoopReporter)
    } else if stream || !output.is_interactive() {
        Box::new(LineReporter::new(output.clone()))
    } else {
        Box::new(SpinnerReporter::new(output.supports_color()))
    }
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Resolve `raw` against `cwd` into `(name, absolute path)`.
///
/// `.` and `..` are folded lexically so `../foo` lands next to `cwd`.
pub fn resolve_project_path(raw: &str, cwd: &Path) -> CliResult<(String, PathBuf)> {
    let mut path = PathBuf::new();
    for component in cwd.join(raw).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path.pop();
            }
            other => path.push(other),
        }
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: raw.into(),
            reason: "cannot extract a project name from this path".into(),
        })?
        .to_string();

    Ok((name, path))
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Flags win; anything unset comes from the config file's `[defaults]`.
fn build_configuration(
    args: &NewArgs,
    defaults: &Defaults,
    name: String,
    path: PathBuf,
) -> CliResult<ProjectConfiguration> {
    let mut builder = ProjectConfiguration::builder(name, path)
        .language(args.language.unwrap_or(defaults.language))
        .package_manager(args.package_manager.unwrap_or(defaults.package_manager))
        .styling(args.styling.unwrap_or(defaults.styling))
        .state_management(args.state)
        .ui_library(args.ui)
        .orm(args.orm)
        .database(args.database)
        .auth(args.auth)
        .testing(args.testing.iter().copied())
        .extras(args.extras.iter().copied())
        .folder_structure(args.structure.unwrap_or(defaults.folder_structure))
        .src_dir(!args.no_src_dir)
        .git(defaults.git && !args.no_git)
        .install(defaults.install && !args.no_install);

    if let Some(project_type) = args.project_type {
        builder = builder.project_type(project_type);
    }
    if let Some(framework) = args.framework {
        builder = builder.framework(framework);
    }
    if let Some(alias) = &args.import_alias {
        builder = builder.import_alias(alias.clone());
    }

    builder
        .build()
        .map_err(|e| CliError::Core(LaunchpadError::from(e)))
}

// ── Pre-flight ────────────────────────────────────────────────────────────────

fn preflight(project: &ProjectConfiguration, plan: &ExecutionPlan) -> CliResult<()> {
    let path = project.path();
    if path.exists() {
        return Err(CliError::ProjectExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            return Err(CliError::ParentMissing {
                path: parent.to_path_buf(),
            });
        }
    }

    let programs: BTreeSet<&str> = plan
        .invocations()
        .into_iter()
        .map(|inv| inv.program.as_str())
        .collect();
    for program in programs {
        if which::which(program).is_err() {
            return Err(CliError::ToolMissing {
                tool: program.to_string(),
                hint: install_hint(program),
            });
        }
        debug!(program, "Found on PATH");
    }
    Ok(())
}

fn install_hint(program: &str) -> &'static str {
    match program {
        "npm" | "npx" => "Install Node.js from https://nodejs.org",
        "pnpm" | "yarn" => "Enable it with: corepack enable",
        "bun" | "bunx" => "Install Bun from https://bun.sh",
        "git" => "Install git, or pass --no-git",
        _ => "Check your installation",
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(project: &ProjectConfiguration, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:    {}", project.name()))?;
    out.print(&format!(
        "  Framework:  {} ({})",
        project.framework(),
        project.project_type()
    ))?;
    out.print(&format!("  Language:   {}", project.effective_language()))?;
    out.print(&format!("  Packages:   {}", project.package_manager()))?;
    out.print(&format!("  Location:   {}", project.path().display()))?;
    out.print("")?;
    Ok(())
}

/// Ask before creating anything.  Empty input means yes; end of input means no.
fn confirm() -> CliResult<bool> {
    #[cfg(feature = "interactive")]
    if console::Term::stderr().is_term() {
        return dialoguer::Confirm::new()
            .with_prompt("Create this project?")
            .default(true)
            .interact()
            .map_err(|e| CliError::IoError {
                message: "confirmation prompt failed".into(),
                source: std::io::Error::other(e.to_string()),
            });
    }

    confirm_from_stdin()
}

fn confirm_from_stdin() -> CliResult<bool> {
    use std::io::{self, Write};

    eprint!("Create this project? [Y/n] ");
    io::stderr().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stderr".into(),
        source: e,
    })?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;
    if read == 0 {
        return Ok(false);
    }

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

/// Print every step and command the run would execute.
fn print_plan(
    project: &ProjectConfiguration,
    plan: &ExecutionPlan,
    out: &OutputManager,
) -> CliResult<()> {
    out.header(&format!("Dry run: plan for {project}"))?;
    out.print(&format!("  Target: {}", project.path().display()))?;

    for (index, planned) in plan.steps.iter().enumerate() {
        out.print(&format!("  {}. {}", index + 1, planned.step.label()))?;
        for line in describe_work(planned.step, &planned.work) {
            out.detail(&format!("       {line}"))?;
        }
    }

    for note in &plan.notes {
        out.warning(note)?;
    }
    out.info("Dry run: nothing was created")?;
    Ok(())
}

fn describe_work(step: StepKind, work: &StepWork) -> Vec<String> {
    match work {
        StepWork::CreateDirectory { path } => vec![format!("mkdir {}", path.display())],
        StepWork::Commands(invocations) if invocations.is_empty() => {
            vec![format!("(skipped: --no-{step})")]
        }
        StepWork::Commands(invocations) => invocations.iter().map(|i| format!("$ {i}")).collect(),
        StepWork::Files(files) => files
            .iter()
            .map(|f| format!("write {}", f.path.display()))
            .collect(),
        StepWork::Groups(groups) => groups
            .iter()
            .flat_map(|g| {
                std::iter::once(format!("[{}]", g.capability))
                    .chain(g.invocations.iter().map(|i| format!("$ {i}")))
            })
            .collect(),
        StepWork::Structure(entries) if entries.is_empty() => {
            vec!["(keep the tool's layout)".into()]
        }
        StepWork::Structure(entries) => entries
            .iter()
            .map(|e| format!("ensure {}/", e.directory.display()))
            .collect(),
    }
}

fn print_report(
    project: &ProjectConfiguration,
    report: &PipelineReport,
    out: &OutputManager,
) -> CliResult<()> {
    info!(run_id = %report.run_id, invocations = report.invocations, "Pipeline completed");

    out.success(&format!(
        "Project '{}' created in {:.1}s",
        project.name(),
        report.elapsed.as_secs_f64()
    ))?;
    for warning in &report.warnings {
        out.warning(warning)?;
    }
    out.detail(&format!(
        "  Finished {} · {} commands · run {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        report.invocations,
        report.run_id
    ))?;

    let pm = project.package_manager();
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", project.path().display()))?;
    if !project.install() {
        out.print(&format!("  {pm} install"))?;
    }
    let script = match project.project_type() {
        ProjectType::Library => "build",
        _ => "dev",
    };
    out.print(&format!("  {pm} run {script}"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use launchpad_core::domain::{Framework, PackageManager, Styling};

    fn new_args(extra: &[&str]) -> NewArgs {
        let mut argv = vec!["launchpad", "new", "my-app"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    fn build(extra: &[&str], defaults: &Defaults) -> CliResult<ProjectConfiguration> {
        build_configuration(
            &new_args(extra),
            defaults,
            "my-app".into(),
            PathBuf::from("/work/my-app"),
        )
    }

    // ── resolve_project_path ──────────────────────────────────────────────────

    #[test]
    fn simple_name_resolves_under_cwd() {
        let (name, path) = resolve_project_path("my-app", Path::new("/work")).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(path, PathBuf::from("/work/my-app"));
    }

    #[test]
    fn parent_segments_are_folded() {
        let (name, path) = resolve_project_path("../my-app", Path::new("/work/sub")).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(path, PathBuf::from("/work/my-app"));

        let (_, path) = resolve_project_path("./nested/./app", Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/work/nested/app"));
    }

    #[test]
    fn absolute_path_ignores_cwd() {
        let (name, path) = resolve_project_path("/srv/site", Path::new("/work")).unwrap();
        assert_eq!(name, "site");
        assert_eq!(path, PathBuf::from("/srv/site"));
    }

    #[test]
    fn path_without_a_name_is_rejected() {
        assert!(matches!(
            resolve_project_path("/", Path::new("/work")),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    // ── build_configuration ───────────────────────────────────────────────────

    #[test]
    fn flags_override_config_defaults() {
        let defaults = Defaults {
            package_manager: PackageManager::Pnpm,
            styling: Styling::Scss,
            ..Defaults::default()
        };

        let from_defaults = build(&["--framework", "react"], &defaults).unwrap();
        assert_eq!(from_defaults.package_manager(), PackageManager::Pnpm);
        assert_eq!(from_defaults.styling(), Styling::Scss);

        let overridden = build(
            &["--framework", "react", "--pm", "bun", "--styling", "tailwind"],
            &defaults,
        )
        .unwrap();
        assert_eq!(overridden.package_manager(), PackageManager::Bun);
        assert_eq!(overridden.styling(), Styling::Tailwind);
    }

    #[test]
    fn type_is_inferred_from_framework() {
        let config = build(&["--framework", "nestjs"], &Defaults::default()).unwrap();
        assert_eq!(config.project_type(), ProjectType::Backend);
    }

    #[test]
    fn framework_is_inferred_from_type() {
        let config = build(&["--type", "fullstack"], &Defaults::default()).unwrap();
        assert_eq!(config.framework(), Framework::NextJs);
    }

    #[test]
    fn neither_type_nor_framework_is_a_user_error() {
        let err = build(&[], &Defaults::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_git_flag_and_config_default_both_disable_git() {
        let config = build(&["--framework", "vue", "--no-git"], &Defaults::default()).unwrap();
        assert!(!config.git());

        let defaults = Defaults {
            git: false,
            ..Defaults::default()
        };
        assert!(!build(&["--framework", "vue"], &defaults).unwrap().git());
    }

    #[test]
    fn mismatched_type_and_framework_is_rejected() {
        let err = build(&["--type", "backend", "--framework", "react"], &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    // ── plan rendering ────────────────────────────────────────────────────────

    #[test]
    fn skipped_install_is_described() {
        let lines = describe_work(StepKind::Install, &StepWork::Commands(Vec::new()));
        assert_eq!(lines, vec!["(skipped: --no-install)".to_string()]);
    }

    #[test]
    fn plan_lines_list_every_invocation() {
        let config = build(
            &["--framework", "react", "--styling", "tailwind"],
            &Defaults::default(),
        )
        .unwrap();
        let plan = ExecutionPlan::for_config(&config);
        let rendered: Vec<String> = plan
            .steps
            .iter()
            .flat_map(|s| describe_work(s.step, &s.work))
            .collect();
        for invocation in plan.invocations() {
            let expected = format!("$ {invocation}");
            assert!(rendered.contains(&expected), "missing {expected}");
        }
    }

    // ── pre-flight ────────────────────────────────────────────────────────────

    #[test]
    fn preflight_rejects_existing_target() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("my-app")).unwrap();
        let config = ProjectConfiguration::builder("my-app", tmp.path().join("my-app"))
            .framework(Framework::React)
            .build()
            .unwrap();
        let err = preflight(&config, &ExecutionPlan::for_config(&config)).unwrap_err();
        assert!(matches!(err, CliError::ProjectExists { .. }));
    }

    #[test]
    fn preflight_rejects_missing_parent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = tmp.path().join("missing").join("my-app");
        let config = ProjectConfiguration::builder("my-app", target)
            .framework(Framework::React)
            .build()
            .unwrap();
        let err = preflight(&config, &ExecutionPlan::for_config(&config)).unwrap_err();
        assert!(matches!(err, CliError::ParentMissing { .. }));
    }

    #[test]
    fn library_without_install_or_git_needs_no_tools() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ProjectConfiguration::builder("my-lib", tmp.path().join("my-lib"))
            .project_type(ProjectType::Library)
            .git(false)
            .install(false)
            .build()
            .unwrap();
        assert!(preflight(&config, &ExecutionPlan::for_config(&config)).is_ok());
    }
}
