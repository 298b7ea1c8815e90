//! Integration tests for the DataFlow CLI.
//!
//! These tests run the actual binary and drive the generate interview by
//! piping answers through stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn dataflow_cmd() -> Command {
    Command::cargo_bin("dataflow").unwrap()
}

#[test]
fn test_help_flag() {
    dataflow_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "generate multi-source data aggregation workflows",
        ));
}

#[test]
fn test_generate_help() {
    dataflow_cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"));
}

// ============================================================================
// Generate Interview Tests
// ============================================================================

/// Answers for a two-source workflow with synthesis: one authenticated REST
/// source, one database source.
const TWO_SOURCE_INTERVIEW: &str = "\
test_workflow
2
y
1
api_source
https://api.example.com/data
2
2
db_source
https://db.example.com
1
";

#[test]
fn test_generate_two_source_workflow() {
    let temp_dir = TempDir::new().unwrap();

    dataflow_cmd()
        .args(["generate", "--output", temp_dir.path().to_str().unwrap()])
        .write_stdin(TWO_SOURCE_INTERVIEW)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow generated successfully"))
        .stdout(predicate::str::contains("Sources: 2"))
        .stdout(predicate::str::contains("Agents:  3"))
        .stdout(predicate::str::contains("api_source_token"));

    let workflow_file = temp_dir.path().join("test_workflow.yml");
    assert!(workflow_file.exists());

    let contents = fs::read_to_string(&workflow_file).unwrap();
    assert!(contents.contains("id: test_workflow"));
    assert!(contents.contains("namespace: dataflow"));
    assert!(contents.contains("*/5 * * * *"));

    // Task order: fetch/summarize per source, then synthesis pair
    let expected_order = [
        "fetch_api_source",
        "summarize_api_source",
        "fetch_db_source",
        "summarize_db_source",
        "synthesis_decision_agent",
        "execute_decision_log",
    ];
    let mut last = 0;
    for id in expected_order {
        let pos = contents
            .find(&format!("id: {id}"))
            .unwrap_or_else(|| panic!("missing task id {id}"));
        assert!(pos > last, "task {id} out of order");
        last = pos;
    }

    // The secret is referenced by name, never embedded as a value
    assert!(contents.contains("Authorization"));
    assert!(contents.contains("api_source_token"));
}

#[test]
fn test_generate_without_synthesis_omits_decision_tasks() {
    let temp_dir = TempDir::new().unwrap();

    let answers = "\
plain_pipeline
2
n
1
first_source
https://api.example.com/a
1
1
second_source
https://api.example.com/b
1
";

    dataflow_cmd()
        .args(["generate", "--output", temp_dir.path().to_str().unwrap()])
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Decision agent: no"));

    let contents =
        fs::read_to_string(temp_dir.path().join("plain_pipeline.yml")).unwrap();
    assert!(!contents.contains("synthesis_decision_agent"));
    assert!(!contents.contains("execute_decision_log"));
}

#[test]
fn test_generate_reprompts_on_invalid_name_then_succeeds() {
    let temp_dir = TempDir::new().unwrap();

    let answers = "\
ab
retry_pipeline
2
n
1
one_source
https://api.example.com/a
1
1
two_source
https://api.example.com/b
1
";

    dataflow_cmd()
        .args(["generate", "--output", temp_dir.path().to_str().unwrap()])
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("between 3 and 50"));

    assert!(temp_dir.path().join("retry_pipeline.yml").exists());
}

#[test]
fn test_generate_eof_mid_interview_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();

    dataflow_cmd()
        .args(["generate", "--output", temp_dir.path().to_str().unwrap()])
        .write_stdin("some_workflow\n2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));

    // Nothing was written
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_generate_missing_output_dir_is_write_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no-such-dir");

    dataflow_cmd()
        .args(["generate", "--output", missing.to_str().unwrap()])
        .write_stdin(TWO_SOURCE_INTERVIEW)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write"));
}

#[test]
fn test_generate_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let workflow_file = temp_dir.path().join("test_workflow.yml");
    fs::write(&workflow_file, "stale contents").unwrap();

    dataflow_cmd()
        .args(["generate", "--output", temp_dir.path().to_str().unwrap()])
        .write_stdin(TWO_SOURCE_INTERVIEW)
        .assert()
        .success();

    let contents = fs::read_to_string(&workflow_file).unwrap();
    assert!(!contents.contains("stale contents"));
    assert!(contents.contains("id: test_workflow"));
}
