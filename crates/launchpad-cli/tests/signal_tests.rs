//! Termination signals during a run roll the project back.
//!
//! A fake `npx` on `PATH` stands in for the bootstrap tool: it writes
//! `package.json` into the project and then blocks for a few seconds, which
//! is when the signal arrives.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

const SLOW_BOOTSTRAP: &str = "#!/bin/sh\ntouch package.json\nsleep 3\n";

fn install_fake_npx(bin: &Path) {
    fs::create_dir_all(bin).unwrap();
    let npx = bin.join("npx");
    fs::write(&npx, SLOW_BOOTSTRAP).unwrap();
    fs::set_permissions(&npx, fs::Permissions::from_mode(0o755)).unwrap();
}

fn wait_for(path: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    false
}

/// Start a run, send `signal` once bootstrap is underway, and return the exit code.
fn run_and_signal(signal: &str) -> Option<i32> {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    install_fake_npx(&bin);

    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let mut child = Command::new(env!("CARGO_BIN_EXE_launchpad"))
        .current_dir(temp.path())
        .env("PATH", path)
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args([
            "new",
            "demo",
            "--framework",
            "react",
            "--no-install",
            "--no-git",
            "--yes",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let target = temp.path().join("demo");
    assert!(
        wait_for(&target.join("package.json"), Duration::from_secs(10)),
        "bootstrap never started"
    );

    let pid = child.id().to_string();
    let status = Command::new("kill")
        .args([signal, pid.as_str()])
        .status()
        .unwrap();
    assert!(status.success());

    let code = child.wait().unwrap().code();
    assert!(!target.exists(), "project directory survived {signal}");
    assert!(temp.path().exists(), "rollback must not touch the parent");
    code
}

#[test]
fn sigterm_mid_bootstrap_rolls_back_and_exits_130() {
    assert_eq!(run_and_signal("-TERM"), Some(130));
}

#[test]
fn sigint_mid_bootstrap_rolls_back_and_exits_130() {
    assert_eq!(run_and_signal("-INT"), Some(130));
}

#[test]
fn sighup_mid_bootstrap_rolls_back_and_exits_130() {
    assert_eq!(run_and_signal("-HUP"), Some(130));
}
