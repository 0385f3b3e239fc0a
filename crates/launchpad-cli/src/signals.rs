//! Termination-signal handling (SIGINT, SIGTERM, SIGHUP).
//!
//! The handler is installed once at startup.  While a pipeline runs, a
//! termination signal only trips that run's [`CancellationToken`]: a Ctrl-C
//! also reaches the child through the terminal's process group, the
//! orchestrator sees the token once the current command returns, rolls back,
//! and `main` exits with 130.  Outside a run there is nothing to undo, so the
//! process exits immediately.

use std::sync::{Arc, Mutex, PoisonError};

use launchpad_core::application::CancellationToken;

/// Exit status for a run stopped by a termination signal.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

type Slot = Arc<Mutex<Option<CancellationToken>>>;

/// Routes termination signals to whichever run is active.
#[derive(Debug, Clone, Default)]
pub struct SignalScope {
    active: Slot,
}

impl SignalScope {
    /// Install the process-wide handler for SIGINT, SIGTERM and SIGHUP.
    pub fn install() -> anyhow::Result<Self> {
        let signals = Self::default();
        let active = Arc::clone(&signals.active);
        ctrlc::set_handler(move || on_interrupt(&active))?;
        Ok(signals)
    }

    /// Route signals to `token` until the returned guard is dropped.
    pub fn arm(&self, token: &CancellationToken) -> ArmedRun {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        ArmedRun {
            active: Arc::clone(&self.active),
        }
    }
}

fn on_interrupt(active: &Slot) {
    let armed = active
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    match armed {
        Some(token) => {
            if !token.is_cancelled() {
                eprintln!("\nTermination signal received; rolling back...");
            }
            token.cancel();
        }
        None => {
            eprintln!();
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

/// Keeps signals routed to one run.
#[must_use = "termination signals fall back to exiting as soon as this is dropped"]
#[derive(Debug)]
pub struct ArmedRun {
    active: Slot,
}

impl Drop for ArmedRun {
    fn drop(&mut self) {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_interrupt_cancels_instead_of_exiting() {
        let signals = SignalScope::default();
        let token = CancellationToken::new();
        let _run = signals.arm(&token);

        on_interrupt(&signals.active);
        assert!(token.is_cancelled());
    }

    #[test]
    fn dropping_the_guard_disarms() {
        let signals = SignalScope::default();
        let token = CancellationToken::new();
        drop(signals.arm(&token));
        assert!(signals.active.lock().unwrap().is_none());
    }
}
