//! The probe binary, run the way a user would

use std::process::Command;

const PROBE: &str = env!("CARGO_BIN_EXE_ksigaction-probe");

#[test]
fn probe_describes_the_abi() {
    println!("Testing ksigaction-probe descriptor output...");

    let result = Command::new(PROBE).output().expect("Failed to run ksigaction-probe");
    let stdout = String::from_utf8_lossy(&result.stdout);

    assert!(
        result.status.success(),
        "probe failed. Error: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(stdout.contains("architecture:"));
    assert!(stdout.contains(&format!("sigsetsize:        {} bytes", ksigaction::SIGSET_SIZE)));
    assert!(stdout.contains("restorer strategy:"));

    println!("✅ Descriptor output looks right");
}

#[test]
fn probe_self_check_passes() {
    let result = Command::new(PROBE)
        .args(["--check", &libc::SIGUSR1.to_string()])
        .output()
        .expect("Failed to run ksigaction-probe");
    let stdout = String::from_utf8_lossy(&result.stdout);

    assert!(
        result.status.success(),
        "self check failed. Error: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(stdout.contains("handler ran"), "{}", stdout);
    assert!(stdout.contains("check passed"), "{}", stdout);
}

#[test]
fn probe_rejects_unknown_log_level() {
    let result = Command::new(PROBE)
        .args(["--log-level", "loud"])
        .output()
        .expect("Failed to run ksigaction-probe");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("unknown log level"));
}

#[test]
fn probe_logs_syscalls_at_debug() {
    let result = Command::new(PROBE)
        .args(["--check", &libc::SIGUSR2.to_string()])
        .env("KSIGACTION_LOG", "debug")
        .output()
        .expect("Failed to run ksigaction-probe");

    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("rt_sigaction("));
}
