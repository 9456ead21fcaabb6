// logscrub/tests/cli_integration_tests.rs
//! Command-line integration tests for the `logscrub` executable.
//!
//! These tests run the real binary with `assert_cmd`, feed it input over
//! stdin or temporary files, and assert on stdout, stderr, and exit status.
//! `tempfile` keeps every test isolated on disk.

use std::fs;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Runs `logscrub` with the given stdin input and arguments.
fn run_logscrub(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("logscrub").unwrap();
    cmd.args(args);
    cmd.write_stdin(input);
    cmd.assert()
}

#[test]
fn sanitize_stdin_redacts_password_assignments() {
    run_logscrub("Authentication failed with password=SuperSecret123\n", &["sanitize", "-q"])
        .success()
        .stdout("Authentication failed with [PASSWORD_REDACTED]\n")
        .stdout(predicate::str::contains("SuperSecret123").not());
}

#[test]
fn sanitize_prints_summary_on_stderr_by_default() {
    run_logscrub("password=hunter22\nclean line\n", &["sanitize"])
        .success()
        .stderr(predicate::str::contains("Sanitization Summary"))
        .stderr(predicate::str::contains("Lines processed:  2"))
        .stderr(predicate::str::contains("Lines modified:   1"));
}

#[test]
fn no_summary_flag_silences_the_summary() {
    run_logscrub("password=hunter22\n", &["sanitize", "--no-summary"])
        .success()
        .stderr(predicate::str::contains("Sanitization Summary").not());
}

#[test]
fn sanitize_file_to_file_writes_report_and_output() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("build.log");
    let output = dir.path().join("build.clean.log");
    fs::write(&input, "Deploying for admin@example.com\nAll tests passed\n")?;

    let mut cmd = Command::cargo_bin("logscrub")?;
    cmd.args([
        "sanitize",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Lines processed:  2"));

    let sanitized = fs::read_to_string(&output)?;
    assert_eq!(sanitized, "Deploying for [EMAIL_REDACTED]\nAll tests passed\n");
    Ok(())
}

#[test]
fn custom_config_overrides_default_rules() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("rules.yaml");
    fs::write(&config, "rules:\n  - name: TICKET\n    pattern: 'JIRA-\\d+'\n")?;

    run_logscrub(
        "fixes JIRA-42 for admin@example.com\n",
        &["sanitize", "-q", "--config", config.to_str().unwrap()],
    )
    .success()
    // Only the custom rule applies; the default EMAIL rule is gone.
    .stdout("fixes [TICKET_REDACTED] for admin@example.com\n");
    Ok(())
}

#[test]
fn invalid_config_is_a_hard_error() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("rules.yaml");
    fs::write(&config, "rules:\n  - name: BROKEN\n    pattern: '['\n")?;

    run_logscrub("anything\n", &["sanitize", "-q", "--config", config.to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("BROKEN"));
    Ok(())
}

#[test]
fn terms_file_redacts_organization_names() -> Result<()> {
    let dir = tempdir()?;
    let terms = dir.path().join("terms.json");
    fs::write(
        &terms,
        r#"{"case_insensitive": ["project-phoenix"], "case_sensitive": []}"#,
    )?;

    run_logscrub(
        "Deploying Project-Phoenix to staging\n",
        &["sanitize", "-q", "--terms", terms.to_str().unwrap()],
    )
    .success()
    .stdout("Deploying [SENSITIVE_TERM_REDACTED] to staging\n");
    Ok(())
}

#[test]
fn terms_file_can_come_from_the_environment() -> Result<()> {
    let dir = tempdir()?;
    let terms = dir.path().join("terms.json");
    fs::write(
        &terms,
        r#"{"case_insensitive": ["acme-internal"], "case_sensitive": []}"#,
    )?;

    let mut cmd = Command::cargo_bin("logscrub")?;
    cmd.env("LOGSCRUB_TERMS_FILE", terms.to_str().unwrap());
    cmd.args(["sanitize", "-q"]);
    cmd.write_stdin("calling ACME-Internal api\n");
    cmd.assert()
        .success()
        .stdout("calling [SENSITIVE_TERM_REDACTED] api\n");
    Ok(())
}

#[test]
fn max_lines_truncates_stdin_processing() {
    run_logscrub("one\ntwo\nthree\n", &["sanitize", "-q", "--max-lines", "2"])
        .success()
        .stdout("one\ntwo\n");
}

#[test]
fn empty_stdin_produces_empty_output() {
    run_logscrub("", &["sanitize", "-q"]).success().stdout("");
}

#[test]
fn scan_reports_per_rule_counts() {
    run_logscrub(
        "password=a1b2c3d4\nmail admin@example.com and ops@example.com\n",
        &["scan"],
    )
    .success()
    .stdout(predicate::str::contains("Scan Summary"))
    .stdout(predicate::str::contains("PASSWORD"))
    .stdout(predicate::str::contains("EMAIL"))
    // Scan mode never echoes matched text.
    .stdout(predicate::str::contains("a1b2c3d4").not())
    .stdout(predicate::str::contains("admin@example.com").not());
}

#[test]
fn scan_json_stdout_is_machine_readable() -> Result<()> {
    let assert = run_logscrub(
        "password=a1b2c3d4\nmail admin@example.com and ops@example.com\n",
        &["scan", "--json-stdout"],
    )
    .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["total_lines"], 2);
    assert_eq!(report["modified_lines"], 2);
    let rules = report["rules"].as_array().unwrap();
    let occurrences = |name: &str| {
        rules
            .iter()
            .find(|r| r["rule_name"] == name)
            .map(|r| r["occurrences"].as_u64().unwrap())
    };
    assert_eq!(occurrences("PASSWORD"), Some(1));
    assert_eq!(occurrences("EMAIL"), Some(2));
    Ok(())
}

#[test]
fn scan_json_file_export() -> Result<()> {
    let dir = tempdir()?;
    let json_path = dir.path().join("report.json");

    run_logscrub(
        "password=a1b2c3d4\n",
        &["scan", "--json-file", json_path.to_str().unwrap()],
    )
    .success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(report["redacted_items"], 1);
    Ok(())
}

#[test]
fn scan_fail_over_threshold_sets_exit_code() {
    run_logscrub(
        "password=a1b2c3d4\nmail admin@example.com\n",
        &["scan", "-q", "--fail-over-threshold", "1"],
    )
    .failure()
    .stderr(predicate::str::contains("exceeding the threshold"));

    run_logscrub(
        "password=a1b2c3d4\n",
        &["scan", "-q", "--fail-over-threshold", "1"],
    )
    .success();
}

#[test]
fn no_arguments_shows_help() {
    Command::cargo_bin("logscrub")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
