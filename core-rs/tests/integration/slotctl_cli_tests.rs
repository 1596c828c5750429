//! Integration tests for the slotctl binary
//!
//! Runs the built binary end to end:
//! - init writes lot.yaml and refuses to overwrite it
//! - show prints the empty lot
//! - run executes scripts and sets the exit status

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const SLOTCTL: &str = env!("CARGO_BIN_EXE_slotctl");

fn slotctl(dir: &Path, args: &[&str]) -> Output {
    Command::new(SLOTCTL)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to run slotctl")
}

fn slotctl_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(SLOTCTL)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn slotctl");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_cli_version_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = slotctl(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let args = ["init", "--name", "downtown", "--capacity", "5", "--address", "fake street"];

    let first = slotctl(temp_dir.path(), &args);
    assert!(first.status.success(), "init failed: {}", String::from_utf8_lossy(&first.stderr));

    let written = fs::read_to_string(temp_dir.path().join("lot.yaml")).unwrap();
    assert!(written.contains("apiVersion: slot-tracker/v1"));
    assert!(written.contains("capacity: 5"));

    let second = slotctl(temp_dir.path(), &args);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));

    // Original file untouched
    assert_eq!(fs::read_to_string(temp_dir.path().join("lot.yaml")).unwrap(), written);
}

#[test]
fn test_show_json_reports_empty_lot() {
    let temp_dir = TempDir::new().unwrap();
    let init = slotctl(
        temp_dir.path(),
        &["init", "--name", "north", "--capacity", "3", "--address", "1 Main St"],
    );
    assert!(init.status.success());

    let output = slotctl(temp_dir.path(), &["show", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["capacity"], 3);
    assert_eq!(report["address"], "1 Main St");
    assert_eq!(report["available"], 3);
    assert_eq!(report["occupied"], 0);
    assert_eq!(report["passholderPercentage"], 0.0);
}

#[test]
fn test_run_script_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("day.txt");
    fs::write(&script, "park ABC123 pass\npark DEF456\nleave 1\nstatus\n").unwrap();

    let output = slotctl(
        temp_dir.path(),
        &["run", "--capacity", "5", "--address", "fake street", "--script", "day.txt"],
    );

    assert!(output.status.success(), "run failed: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parked ABC123 in slot 1"));
    assert!(stdout.contains("ABC123 left slot 1"));
    assert!(stdout.contains("fake street: 4/5 available, 0 passholders (0.0%)"));
}

#[test]
fn test_run_exits_nonzero_when_a_line_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = slotctl_with_stdin(
        temp_dir.path(),
        &["run", "--capacity", "1", "--format", "json"],
        "park A1\npark B2\n",
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "parked");
    assert_eq!(events[1]["event"], "error");
    assert!(events[1]["error"].as_str().unwrap().contains("All slots full"));
}

#[test]
fn test_run_reads_config_from_stdin_session() {
    let temp_dir = TempDir::new().unwrap();
    let init = slotctl(
        temp_dir.path(),
        &["init", "--name", "downtown", "--capacity", "2", "--address", "fake street"],
    );
    assert!(init.status.success());

    let output = slotctl_with_stdin(
        temp_dir.path(),
        &["run", "--config", "lot.yaml"],
        "park ABC321 pass\npassholders\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parked ABC321 in slot 1"));
    assert!(stdout.contains("passholders: ABC321"));
}

#[test]
fn test_run_rejects_config_with_capacity() {
    let temp_dir = TempDir::new().unwrap();

    let output = slotctl(
        temp_dir.path(),
        &["run", "--config", "lot.yaml", "--capacity", "5"],
    );

    // clap usage errors exit with status 2
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used with"));
}

#[test]
fn test_run_without_lot_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = slotctl_with_stdin(temp_dir.path(), &["run"], "status\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no lot given"));
}
