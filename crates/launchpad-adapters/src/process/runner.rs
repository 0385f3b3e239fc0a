//! Child-process adapter using std::process.

use std::io::{self, ErrorKind};
use std::process::{Command, Stdio};
use std::time::Instant;

use launchpad_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{ExecutionResult, Invocation, OutputMode},
};
use tracing::{debug, instrument};

/// Production command runner.
///
/// Runs the program directly (never through a shell) with stdin closed and
/// the non-interactive environment layered over the parent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(
        &self,
        invocation: &Invocation,
        mode: OutputMode,
    ) -> Result<ExecutionResult, ApplicationError> {
        let started = Instant::now();

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.effective_env())
            .stdin(Stdio::null());

        let (status, output) = match mode {
            OutputMode::Capture => {
                let out = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .map_err(|e| spawn_error(invocation, e))?;
                (
                    out.status,
                    Some(String::from_utf8_lossy(&out.stdout).into_owned()),
                )
            }
            OutputMode::Quiet => {
                let status = command
                    .stdout(Stdio::null())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| spawn_error(invocation, e))?;
                (status, None)
            }
            OutputMode::Inherit => {
                let status = command
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| spawn_error(invocation, e))?;
                (status, None)
            }
        };

        let result = ExecutionResult {
            exit_code: status.code(),
            output,
            elapsed: started.elapsed(),
        };
        debug!(
            exit_code = ?result.exit_code,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Command finished"
        );

        if !result.success() {
            return Err(ApplicationError::ExternalProcess {
                command: invocation.to_string(),
                exit_code: result.exit_code,
            });
        }
        Ok(result)
    }
}

fn spawn_error(invocation: &Invocation, e: io::Error) -> ApplicationError {
    let cause = match e.kind() {
        ErrorKind::NotFound => format!("'{}' was not found on PATH", invocation.program),
        ErrorKind::PermissionDenied => format!("'{}' is not executable", invocation.program),
        _ => e.to_string(),
    };
    ApplicationError::Spawn {
        command: invocation.to_string(),
        cause,
    }
}
