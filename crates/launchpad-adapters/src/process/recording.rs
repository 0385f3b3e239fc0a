//! Recording command runner for tests.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use launchpad_core::{
    application::{ApplicationError, CancellationToken, ports::CommandRunner},
    domain::{ExecutionResult, Invocation, OutputMode},
};

type Effect = Arc<dyn Fn(&Invocation) + Send + Sync>;

enum Matcher {
    Program(String),
    Arg(String),
}

impl Matcher {
    fn matches(&self, invocation: &Invocation) -> bool {
        match self {
            Self::Program(program) => invocation.program == *program,
            Self::Arg(arg) => invocation.has_arg(arg),
        }
    }
}

enum Action {
    Exit(Option<i32>),
    SpawnError,
    /// Cancel the token, then fail as a signal-killed child would.
    Cancel(CancellationToken),
}

struct Rule {
    matcher: Matcher,
    action: Action,
}

#[derive(Default)]
struct RecordingInner {
    calls: Vec<(Invocation, OutputMode)>,
    rules: Vec<Rule>,
    effects: Vec<Effect>,
}

/// Records every invocation instead of running it.
///
/// Succeeds unless a failure rule matches. Clones share state, so a test
/// keeps one handle and boxes another into the orchestrator.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<RecordingInner>>,
}

impl fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.invocations().len())
            .finish()
    }
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RecordingInner> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_rule(self, matcher: Matcher, action: Action) -> Self {
        self.lock().rules.push(Rule { matcher, action });
        self
    }

    /// Fail every invocation of `program` with `exit_code`.
    pub fn fail_program(self, program: &str, exit_code: i32) -> Self {
        self.push_rule(
            Matcher::Program(program.into()),
            Action::Exit(Some(exit_code)),
        )
    }

    /// Fail every invocation carrying `arg` with `exit_code`.
    pub fn fail_arg(self, arg: &str, exit_code: i32) -> Self {
        self.push_rule(Matcher::Arg(arg.into()), Action::Exit(Some(exit_code)))
    }

    /// Make `program` impossible to launch.
    pub fn missing_program(self, program: &str) -> Self {
        self.push_rule(Matcher::Program(program.into()), Action::SpawnError)
    }

    /// Simulate Ctrl-C arriving while an invocation carrying `arg` runs.
    pub fn cancel_on_arg(self, arg: &str, token: &CancellationToken) -> Self {
        self.push_rule(Matcher::Arg(arg.into()), Action::Cancel(token.clone()))
    }

    /// Run `effect` for every successful invocation (e.g. to mimic a tool
    /// writing files into its working directory).
    pub fn with_effect<F>(self, effect: F) -> Self
    where
        F: Fn(&Invocation) + Send + Sync + 'static,
    {
        self.lock().effects.push(Arc::new(effect));
        self
    }

    /// Every invocation received, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().calls.iter().map(|(i, _)| i.clone()).collect()
    }

    /// Output modes received, in order.
    pub fn modes(&self) -> Vec<OutputMode> {
        self.lock().calls.iter().map(|(_, m)| *m).collect()
    }

    /// Rendered command lines, for readable assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .map(|(i, _)| i.to_string())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(
        &self,
        invocation: &Invocation,
        mode: OutputMode,
    ) -> Result<ExecutionResult, ApplicationError> {
        let effects = {
            let mut inner = self.lock();
            inner.calls.push((invocation.clone(), mode));

            if let Some(rule) = inner.rules.iter().find(|r| r.matcher.matches(invocation)) {
                let command = invocation.to_string();
                return Err(match &rule.action {
                    Action::Exit(exit_code) => ApplicationError::ExternalProcess {
                        command,
                        exit_code: *exit_code,
                    },
                    Action::SpawnError => ApplicationError::Spawn {
                        command,
                        cause: format!("'{}' was not found on PATH", invocation.program),
                    },
                    Action::Cancel(token) => {
                        token.cancel();
                        ApplicationError::ExternalProcess {
                            command,
                            exit_code: None,
                        }
                    }
                });
            }
            inner.effects.clone()
        };

        for effect in effects {
            effect(invocation);
        }

        Ok(ExecutionResult {
            exit_code: Some(0),
            output: None,
            elapsed: Duration::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::domain::CommandLine;

    #[test]
    fn records_in_order_and_shares_state() {
        let runner = RecordingRunner::new();
        let handle = runner.clone();
        for program in ["npx", "npm"] {
            runner
                .run(&CommandLine::new(program).in_dir("/p"), OutputMode::Quiet)
                .unwrap();
        }
        assert_eq!(handle.command_lines(), vec!["npx", "npm"]);
        assert_eq!(handle.modes(), vec![OutputMode::Quiet, OutputMode::Quiet]);
    }

    #[test]
    fn rules_fail_matching_invocations() {
        let runner = RecordingRunner::new().fail_arg("init", 2);
        let ok = CommandLine::new("git").arg("add").in_dir("/p");
        let bad = CommandLine::new("git").arg("init").in_dir("/p");
        assert!(runner.run(&ok, OutputMode::Inherit).is_ok());
        assert_eq!(
            runner.run(&bad, OutputMode::Inherit).unwrap_err(),
            ApplicationError::ExternalProcess {
                command: "git init".into(),
                exit_code: Some(2)
            }
        );
    }

    #[test]
    fn cancel_rule_trips_the_token() {
        let token = CancellationToken::new();
        let runner = RecordingRunner::new().cancel_on_arg("install", &token);
        let inv = CommandLine::new("npm").arg("install").in_dir("/p");
        assert!(runner.run(&inv, OutputMode::Inherit).is_err());
        assert!(token.is_cancelled());
    }
}
