//! Helpers for running the CLI against a mock Yeti server.

#![allow(dead_code)]

use std::process::Output;

use serde_json::json;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "cli-test-key";

/// Token exchange answering with a fixed token.
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/api-token"))
        .and(header("x-yeti-apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "cli-token"
        })))
        .mount(server)
        .await;
}

/// Run the CLI binary against `server`, passing credentials via the environment.
pub async fn run_cli(server: &MockServer, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yetictl"))
        .args(args)
        .env("YETI_WEB_ROOT", server.uri())
        .env("YETI_API_KEY", API_KEY)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(server: &MockServer, args: &[&str]) -> String {
    let output = run_cli(server, args).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(server: &MockServer, args: &[&str]) -> String {
    let output = run_cli(server, args).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
