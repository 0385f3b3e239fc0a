//! Step progress display.
//!
//! Two [`ProgressReporter`] implementations: spinners for an interactive
//! terminal, and plain lines when tool output is streamed or stderr is not a
//! terminal (spinners would garble both).

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use launchpad_core::application::ProgressReporter;
use launchpad_core::domain::{Invocation, StepKind, StepOutcome};

use crate::output::OutputManager;

const TICK: Duration = Duration::from_millis(100);

// ── Spinners ──────────────────────────────────────────────────────────────────

/// One spinner per step, replaced by a status line when the step ends.
#[derive(Debug)]
pub struct SpinnerReporter {
    current: Mutex<Option<(StepKind, ProgressBar)>>,
    color: bool,
}

impl SpinnerReporter {
    pub fn new(color: bool) -> Self {
        Self {
            current: Mutex::new(None),
            color,
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<(StepKind, ProgressBar)>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spinning() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
    }

    fn finished() -> ProgressStyle {
        ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step_started(&self, step: StepKind) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinning());
        bar.set_message(step.label());
        bar.enable_steady_tick(TICK);
        if let Some((_, previous)) = self.current().replace((step, bar)) {
            previous.finish_and_clear();
        }
    }

    fn invocation_started(&self, invocation: &Invocation) {
        if let Some((step, bar)) = self.current().as_ref() {
            bar.set_message(format!("{} ({})", step.label(), invocation.program));
        }
    }

    fn step_finished(&self, step: StepKind, outcome: &StepOutcome) {
        let Some((_, bar)) = self.current().take() else {
            return;
        };
        bar.set_style(Self::finished());
        bar.finish_with_message(status_line(step, outcome, self.color));
    }
}

// ── Plain lines ───────────────────────────────────────────────────────────────

/// Prints each step and command as a line.
#[derive(Debug)]
pub struct LineReporter {
    output: OutputManager,
}

impl LineReporter {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl ProgressReporter for LineReporter {
    fn step_started(&self, step: StepKind) {
        let _ = self.output.header(&format!("==> {}", step.label()));
    }

    fn invocation_started(&self, invocation: &Invocation) {
        let _ = self.output.detail(&format!("  $ {invocation}"));
    }

    fn step_finished(&self, step: StepKind, outcome: &StepOutcome) {
        let _ = self
            .output
            .print(&status_line(step, outcome, self.output.supports_color()));
    }
}

/// `✓ label`, `⚠ label: reason` or `✗ label: reason`.
fn status_line(step: StepKind, outcome: &StepOutcome, color: bool) -> String {
    let label = step.label();
    match (outcome, color) {
        (StepOutcome::Completed, true) => format!("{} {label}", "\u{2713}".green().bold()),
        (StepOutcome::Completed, false) => format!("\u{2713} {label}"),
        (StepOutcome::Degraded(reason), true) => {
            format!("{} {label}: {}", "\u{26a0}".yellow().bold(), reason.yellow())
        }
        (StepOutcome::Degraded(reason), false) => format!("\u{26a0} {label}: {reason}"),
        (StepOutcome::Failed(reason), true) => {
            format!("{} {label}: {}", "\u{2717}".red().bold(), reason.red())
        }
        (StepOutcome::Failed(reason), false) => format!("\u{2717} {label}: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_name_the_step_and_reason() {
        assert_eq!(
            status_line(StepKind::Install, &StepOutcome::Completed, false),
            "\u{2713} Installing dependencies"
        );
        assert_eq!(
            status_line(
                StepKind::VersionControl,
                &StepOutcome::Degraded("git missing".into()),
                false
            ),
            "\u{26a0} Initializing git repository: git missing"
        );
        assert!(
            status_line(StepKind::Bootstrap, &StepOutcome::Failed("boom".into()), false)
                .starts_with('\u{2717}')
        );
    }

    #[test]
    fn spinner_reporter_survives_a_full_step() {
        let reporter = SpinnerReporter::new(false);
        reporter.step_started(StepKind::Bootstrap);
        reporter.step_finished(StepKind::Bootstrap, &StepOutcome::Completed);
        assert!(reporter.current().is_none());
    }
}
