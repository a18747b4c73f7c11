//! End-to-end tests of the `zbctl-rs` binary.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zbctl() -> Command {
    let mut cmd = Command::cargo_bin("zbctl-rs").expect("binary builds");
    cmd.env_remove("ZEEBE_ADDRESS").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_invalid_key_fails_before_network() {
    // Port 1 is never contacted: validation fails first.
    zbctl()
        .args(["--address", "http://127.0.0.1:1", "complete", "job", "notanumber"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("notanumber"));
}

#[test]
fn test_unknown_output_mode() {
    zbctl()
        .args(["complete", "job", "42", "-o", "xml"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_malformed_variables() {
    zbctl()
        .args(["complete", "job", "42", "--variables", "{not json"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to build request"));
}

#[test]
fn test_invalid_address() {
    zbctl()
        .args(["--address", "localhost:26500", "complete", "job", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("localhost:26500"));
}

#[test]
fn test_unreachable_gateway() {
    zbctl()
        .args(["--address", "http://127.0.0.1:1", "complete", "job", "42"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("remote call failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_complete_job_human() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs/42/completion"))
        .and(body_json(serde_json::json!({"variables": {}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    zbctl()
        .args(["--address", &server.uri(), "complete", "job", "42"])
        .assert()
        .success()
        .stdout("Completed job with key 42 and variables {}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_complete_job_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs/42/completion"))
        .and(body_json(serde_json::json!({"variables": {"a": 1}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    zbctl()
        .env("ZEEBE_ADDRESS", server.uri())
        .args(["complete", "job", "42", "--variables", r#"{"a":1}"#, "-o", "json"])
        .assert()
        .success()
        .stdout("{}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_request_reports_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/incidents/7/resolution"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "NOT_FOUND",
            "detail": "Incident with key '7' not found"
        })))
        .mount(&server)
        .await;

    zbctl()
        .args(["--address", &server.uri(), "resolve", "incident", "7"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Incident with key '7' not found"));
}
