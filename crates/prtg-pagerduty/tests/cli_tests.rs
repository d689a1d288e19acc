//! Integration tests for the `prtg-pagerduty` binary.
//!
//! These tests run the compiled program the way PRTG does, point it at a
//! local `wiremock` server and check its exit status.

use serde_json::json;
use std::process::Output;
use tokio::process::Command;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

const ENQUEUE_PATH: &str = "/v2/enqueue";

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(202).set_body_json(json!({
        "status": "success",
        "message": "Event processed",
        "dedup_key": "local-router1-CPU",
    }))
}

async fn run(server: &MockServer, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prtg-pagerduty"))
        .args(args)
        .env("PAGERDUTY_EVENTS_URL", format!("{}{ENQUEUE_PATH}", server.uri()))
        .env_remove("PAGERDUTY_ROUTING_KEY")
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

fn sensor_args<'a>(device: &'a str, status: &'a str, priority: &'a str) -> Vec<&'a str> {
    vec![
        "--probe",
        "local",
        "--device",
        device,
        "--name",
        "CPU",
        "--status",
        status,
        "--date",
        "2024-01-01T10:00:00.000Z",
        "--servicekey",
        "routing-key",
        "--priority",
        priority,
    ]
}

// =============================================================================
// Exit status
// =============================================================================

#[tokio::test]
async fn test_trigger_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENQUEUE_PATH))
        .and(body_partial_json(json!({
            "event_action": "trigger",
            "dedup_key": "local-router1-CPU",
            "payload": { "severity": "warning" },
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &sensor_args("router1", "Down", "***")).await;

    assert!(output.status.success(), "{output:?}");
}

#[tokio::test]
async fn test_single_star_exits_zero_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(accepted())
        .expect(0)
        .mount(&server)
        .await;

    let output = run(&server, &sensor_args("router1", "Down", "*")).await;

    assert!(output.status.success(), "{output:?}");
}

#[tokio::test]
async fn test_api_failure_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream error"))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &sensor_args("router1", "Down", "****")).await;

    assert!(!output.status.success(), "{output:?}");
}

#[tokio::test]
async fn test_resolve_failure_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid routing key"))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &sensor_args("router1", "Up", "***")).await;

    assert!(!output.status.success(), "{output:?}");
}

// =============================================================================
// PRTG argument spellings
// =============================================================================

#[tokio::test]
async fn test_single_dash_resolve() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "event_action": "resolve",
            "dedup_key": "local-router1-CPU",
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let args = [
        "-probe",
        "local",
        "-device",
        "router1",
        "-name",
        "CPU",
        "-status=Up",
        "-servicekey",
        "routing-key",
    ];
    let output = run(&server, &args).await;

    assert!(output.status.success(), "{output:?}");
}

#[tokio::test]
async fn test_dash_leading_device_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "dedup_key": "local--core-sw-CPU",
            "payload": { "component": "-core-sw" },
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &sensor_args("-core-sw", "Down", "**")).await;

    assert!(output.status.success(), "{output:?}");
}
