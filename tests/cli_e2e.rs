//! End-to-end CLI tests.
//!
//! These run the actual binary against fixture exports and check the
//! report text and exit codes. The insights stage is either disabled with
//! `--no-insights` or starved of credentials so no network calls happen.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

const EXPORT: &str = r#"[
  {
    "id": "c1",
    "mapping": {
      "n1": {"message": {
        "author": {"role": "user"},
        "content": {"content_type": "text", "parts": ["hello there world"]},
        "create_time": 1700000000.0
      }},
      "n2": {"message": {
        "author": {"role": "assistant"},
        "content": {"content_type": "text", "parts": ["hi!"]},
        "create_time": 1700000005.0
      }}
    }
  },
  {
    "id": "c2",
    "mapping": {
      "n1": {"message": {
        "author": {"role": "user"},
        "content": {"content_type": "text", "parts": ["second conversation"]},
        "create_time": 1700100000.0
      }}
    }
  }
]"#;

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("conversations.json"), EXPORT).unwrap();
    fs::write(dir.path().join("not_json.json"), "this is not json").unwrap();
    fs::write(dir.path().join("empty.json"), r#"[{"id": "c1", "mapping": {}}]"#).unwrap();
    fs::write(
        dir.path().join("no_user.json"),
        r#"[{"id": "c1", "messages": [{"role": "assistant", "text": "x", "timestamp": 1.0}]}]"#,
    )
    .unwrap();
    dir
}

fn cmd() -> Command {
    Command::cargo_bin("chatwrapped").expect("binary exists")
}

#[test]
fn reports_stats_for_valid_export() {
    let dir = setup_fixtures();
    cmd()
        .arg(dir.path().join("conversations.json"))
        .arg("--no-insights")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Stats"))
        .stdout(predicate::str::contains("Total requests:           2"))
        .stdout(predicate::str::contains("Total conversations:      2"))
        .stdout(predicate::str::contains("Usage Patterns"));
}

#[test]
fn missing_file_fails() {
    cmd()
        .arg("does_not_exist.json")
        .arg("--no-insights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn invalid_json_fails_with_json_error() {
    let dir = setup_fixtures();
    cmd()
        .arg(dir.path().join("not_json.json"))
        .arg("--no-insights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn empty_export_fails_before_stats() {
    let dir = setup_fixtures();
    cmd()
        .arg(dir.path().join("empty.json"))
        .arg("--no-insights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("any messages"))
        .stdout(predicate::str::contains("Quick Stats").not());
}

#[test]
fn assistant_only_export_fails() {
    let dir = setup_fixtures();
    cmd()
        .arg(dir.path().join("no_user.json"))
        .arg("--no-insights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user messages"));
}

#[test]
fn records_flag_writes_jsonl() {
    let dir = setup_fixtures();
    let out = dir.path().join("records.jsonl");
    cmd()
        .arg(dir.path().join("conversations.json"))
        .arg("--no-insights")
        .arg("--records")
        .arg(&out)
        .assert()
        .success();

    let dump = fs::read_to_string(&out).unwrap();
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.lines().all(|line| line.contains("\"timestamp\":")));
}

#[test]
fn insights_skipped_without_credentials() {
    let dir = setup_fixtures();
    cmd()
        .arg(dir.path().join("conversations.json"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("HF_API_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains("GEMINI_API_KEY not set"));
}

#[test]
fn help_shows_examples() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLES"))
        .stdout(predicate::str::contains("--no-insights"));
}
