//! Shared helpers for the mock server tests.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yeti::{RootUrl, YetiClient};

pub const API_KEY: &str = "test-api-key";
pub const TOKEN_PATH: &str = "/api/v2/auth/api-token";

/// Root URL pointing at the mock server.
pub fn mock_root(server: &MockServer) -> RootUrl {
    RootUrl::new(server.uri()).unwrap()
}

/// Token exchange that always hands out `token`, expected `times` times.
pub async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("x-yeti-apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// A client that has already exchanged [`API_KEY`] for `token`.
pub async fn connected_client(server: &MockServer, token: &str) -> YetiClient {
    mount_token(server, token, 1).await;
    YetiClient::connect(mock_root(server), API_KEY).await.unwrap()
}

/// Number of requests the server saw on `request_path`.
pub async fn hits(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
