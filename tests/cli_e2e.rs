//! End-to-end CLI tests for the awb-tracker binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::start_mock_server_or_skip;

/// Command with an isolated config home so a developer's config never leaks in.
fn tracker_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("awb-tracker").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_describes_usage() {
    let home = TempDir::new().unwrap();
    tracker_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AWB"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_no_input_prints_guidance() {
    let home = TempDir::new().unwrap();
    tracker_cmd(&home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No input provided"));
}

#[test]
fn test_invalid_awb_fails_without_network() {
    let home = TempDir::new().unwrap();
    tracker_cmd(&home)
        .args(["--base-url", "http://127.0.0.1:9", "ab!@"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error [invalid_identifier]"))
        .stdout(predicate::str::contains("trackNo=AB%21%40"));
}

#[test]
fn test_empty_awb_argument_is_rejected() {
    let home = TempDir::new().unwrap();
    tracker_cmd(&home)
        .args(["--json", ""])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("AWB number is required"))
        .stdout(predicate::str::contains("\"kind\":\"invalid_identifier\""));
}

#[test]
fn test_unknown_config_key_is_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("awb-tracker");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "retries = 3\n").unwrap();

    tracker_cmd(&home)
        .arg("12345678901")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_invalid_base_url_flag_is_reported() {
    let home = TempDir::new().unwrap();
    tracker_cmd(&home)
        .args(["--base-url", "ftp://example.com", "12345678901"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tracker configuration"));
}

// The binary blocks this test thread while the mock server keeps serving.
#[tokio::test(flavor = "multi_thread")]
async fn test_json_batch_with_partial_success_exits_with_partial_code() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/web/guest/trackdartresult"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<div>Current Status: Delivered</div><div>Delivered On: 14 Feb 2026</div>",
        ))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("awb-tracker");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!("base_url = \"{}\"\ntimeout_secs = 5\n", server.uri()),
    )
    .unwrap();

    let assert = tracker_cmd(&home)
        .args(["--json", "-q"])
        .write_stdin("12345678901\n\nab!@\n")
        .assert()
        .code(2);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["awb"], "12345678901");
    assert_eq!(lines[0]["status"], "Delivered");
    assert_eq!(lines[0]["details"], "14 Feb 2026");
    assert_eq!(lines[1]["kind"], "invalid_identifier");
}
