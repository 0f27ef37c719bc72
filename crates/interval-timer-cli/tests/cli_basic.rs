//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway settings directory.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command with settings stored under `home` and return output.
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_interval-timer"))
        .args(args)
        .env("INTERVAL_TIMER_HOME", home.path())
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
fn run_cli_success(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

#[test]
fn test_config_get_default_rounds() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(&home, &["config", "get", "rounds"]);
    assert_eq!(out.trim(), "10");
    assert!(home.path().join("settings.toml").exists());
}

#[test]
fn test_config_set_persists() {
    let home = TempDir::new().unwrap();
    run_cli_success(&home, &["config", "set", "work_duration", "30"]);
    let out = run_cli_success(&home, &["config", "get", "work_duration"]);
    assert_eq!(out.trim(), "30");
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["config", "set", "rounds", "99"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("rounds"), "unexpected stderr: {stderr}");
}

#[test]
fn test_preset_save_and_list() {
    let home = TempDir::new().unwrap();
    run_cli_success(&home, &["config", "set", "rest_duration", "20"]);
    run_cli_success(&home, &["preset", "save", "2"]);
    let out = run_cli_success(&home, &["preset", "list"]);
    assert!(out.contains("Preset 1: Empty"));
    assert!(out.contains("Preset 2: Workout: 60s, Rest: 20s"));
}

#[test]
fn test_loading_empty_preset_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["preset", "load", "3"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("empty"), "unexpected stderr: {stderr}");
}

#[test]
fn test_short_run_completes_with_fanfare() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(
        &home,
        &[
            "run", "--work", "2", "--rest", "2", "--lead-up", "0", "--rounds", "1", "--json",
            "--silent",
        ],
    );
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("every line is JSON"))
        .collect();
    assert!(events
        .iter()
        .any(|e| e["type"] == "play_sound" && e["sound"] == "work_end"));
    assert!(events.iter().any(|e| e["type"] == "fanfare_triggered"));
    assert_eq!(
        events.last().unwrap()["type"],
        "fanfare_triggered",
        "completion cues come last"
    );
    assert!(events.iter().any(|e| e["phase"] == "idle"));
}

#[test]
fn test_stop_command_on_stdin_ends_run_idle() {
    let home = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_interval-timer"))
        .args(["run", "--work", "60", "--lead-up", "0", "--json", "--silent"])
        .env("INTERVAL_TIMER_HOME", home.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"s\n").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "run failed: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last: serde_json::Value =
        serde_json::from_str(stdout.lines().last().expect("at least one snapshot")).unwrap();
    assert_eq!(last["phase"], "idle");
    assert!(!stdout.contains("fanfare_triggered"));
}
