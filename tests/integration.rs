//! Integration tests for macwatch.
//!
//! These exercise the compiled binary end to end without touching the
//! Dashboard API: config and list handling, report layout, and CLI surface.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Helper to get the path to the compiled binary
fn get_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps directory
    path.push("macwatch");
    path
}

/// Run macwatch and return output
fn run_macwatch(args: &[&str]) -> std::process::Output {
    let binary = get_binary_path();
    Command::new(&binary)
        .args(args)
        .output()
        .expect("Failed to execute macwatch")
}

#[test]
fn test_version_command() {
    let output = run_macwatch(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("macwatch"));
}

#[test]
fn test_help_command() {
    let output = run_macwatch(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scan"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("lists"));
}

#[test]
fn test_scan_without_config_fails() {
    let output = run_macwatch(&["--config", "/nonexistent/macwatch.yaml", "scan"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_init_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("macwatch.yaml");

    let output = run_macwatch(&["--config", config_path.to_str().unwrap(), "init"]);
    assert!(output.status.success());
    assert!(config_path.exists());

    // The generated config points at bad_macs.txt / bad_companies.txt
    // relative to the working directory; create them next to it.
    let macs_path = dir.path().join("bad_macs.txt");
    let companies_path = dir.path().join("bad_companies.txt");
    let mut f = std::fs::File::create(&macs_path).unwrap();
    writeln!(f, "aa:bb:cc:dd:ee:ff").unwrap();
    let mut f = std::fs::File::create(&companies_path).unwrap();
    writeln!(f, "Apple").unwrap();

    let binary = get_binary_path();
    let output = Command::new(&binary)
        .current_dir(dir.path())
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "check",
            "AA-BB-CC-DD-EE-FF",
        ])
        .output()
        .expect("Failed to execute macwatch");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BAD"), "Unexpected stdout: {}", stdout);
}

#[test]
fn test_lists_command_output() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("macwatch.yaml");

    let output = run_macwatch(&["--config", config_path.to_str().unwrap(), "init"]);
    assert!(output.status.success());

    let mut f = std::fs::File::create(dir.path().join("bad_macs.txt")).unwrap();
    writeln!(f, "11:22:33:44:55:66").unwrap();
    let mut f = std::fs::File::create(dir.path().join("bad_companies.txt")).unwrap();
    writeln!(f, "Raspberry").unwrap();

    let binary = get_binary_path();
    let output = Command::new(&binary)
        .current_dir(dir.path())
        .args(["--config", config_path.to_str().unwrap(), "lists"])
        .output()
        .expect("Failed to execute macwatch");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("11:22:33:44:55:66"));
    assert!(stdout.contains("Raspberry"));
}

#[test]
fn test_check_invalid_mac_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("macwatch.yaml");
    let output = run_macwatch(&["--config", config_path.to_str().unwrap(), "init"]);
    assert!(output.status.success());

    let output = run_macwatch(&["--config", config_path.to_str().unwrap(), "check", "nope"]);
    assert!(!output.status.success());
}
