//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway home
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "studyroom-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("STUDYROOM_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_config_defaults_and_set() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "timer.countdown_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "timer.countdown_minutes", "45"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "timer.countdown_minutes"]);
    assert_eq!(stdout.trim(), "45");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_session_add_list_and_report() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "session", "add", "--subject", "Math", "--start", "09:00", "--end", "10:30",
            "--pages", "12", "--date", "2026-10-01",
        ],
    );
    assert_eq!(code, 0);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["duration_min"], 90);

    let (code, stdout, _) = run_cli(home.path(), &["session", "list"]);
    assert_eq!(code, 0);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (code, stdout, _) = run_cli(home.path(), &["report", "summary", "--period", "week"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["total_duration_min"], 90);
    assert_eq!(report["per_subject"][0]["percentage"], 100);
}

#[test]
fn test_session_add_rejects_reversed_range() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["session", "add", "--subject", "Math", "--start", "10:00", "--end", "09:00"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid time range"));

    let (_, stdout, _) = run_cli(home.path(), &["session", "list"]);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_memo_add_and_filter() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        home.path(),
        &["memo", "add", "F = ma", "--subject", "Physics", "--tags", "formula, mechanics"],
    );
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(home.path(), &["memo", "list", "--tag", "mechanics"]);
    let memos: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(memos[0]["text"], "F = ma");

    let (code, _, _) = run_cli(home.path(), &["memo", "add", "   "]);
    assert_ne!(code, 0);
}

#[test]
fn test_memo_with_image_only() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["memo", "add", "--subject", "Math", "--image", "file:///notes/board.jpg"],
    );
    assert_eq!(code, 0);
    let memo: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(memo["text"], "");
    assert_eq!(memo["image_uri"], "file:///notes/board.jpg");

    let (code, _, _) = run_cli(home.path(), &["memo", "add"]);
    assert_ne!(code, 0);
}

#[test]
fn test_quiz_bank() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["quiz", "bank"]);
    assert_eq!(code, 0);
    let bank: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(bank.as_array().map(Vec::len), Some(8));
}
