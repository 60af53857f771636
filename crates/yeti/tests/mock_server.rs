//! Mock server tests for authentication and the request pipeline.
//!
//! These tests use wiremock to simulate a Yeti server and check how the
//! client authenticates, retries on 401 and classifies failures.

mod common;

use common::{API_KEY, TOKEN_PATH, connected_client, hits, mock_root, mount_token};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yeti::{
    AuthMethod, Error, IndicatorQuery, Pagination, Request, UsageError, YetiClient,
};

const SEARCH_PATH: &str = "/api/v2/indicators/search";

fn search_request(server: &MockServer) -> Request {
    Request::post(format!("{}{}", server.uri(), SEARCH_PATH))
        .json(json!({"query": {"name": "test"}, "count": 0, "page": 0}))
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_auth_api_key_installs_bearer_session() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 1).await;

    let client = YetiClient::new(mock_root(&server)).unwrap();
    client
        .authenticate_with_api_key(Some(API_KEY.into()))
        .await
        .unwrap();

    let session = client.session().await;
    assert_eq!(session.authorization(), Some("Bearer T"));
    assert_eq!(client.auth_method().await, Some(AuthMethod::ApiKey));
}

#[tokio::test]
async fn test_auth_uses_stored_key() {
    let server = MockServer::start().await;
    mount_token(&server, "stored", 1).await;

    let client = YetiClient::builder(mock_root(&server))
        .api_key(API_KEY)
        .build()
        .unwrap();
    client.authenticate_with_api_key(None).await.unwrap();

    assert_eq!(client.session().await.authorization(), Some("Bearer stored"));
}

#[tokio::test]
async fn test_token_exchange_sends_no_body() {
    let server = MockServer::start().await;
    connected_client(&server, "T").await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_missing_api_key_sends_nothing() {
    let server = MockServer::start().await;

    let client = YetiClient::new(mock_root(&server)).unwrap();
    let err = client.authenticate_with_api_key(None).await.unwrap_err();

    assert!(matches!(err, Error::Usage(UsageError::MissingApiKey)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_access_token_keeps_previous_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "first"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let err = client.authenticate_with_api_key(None).await.unwrap_err();
    assert!(matches!(err, Error::Integrity { .. }));
    assert_eq!(client.session().await.authorization(), Some("Bearer first"));
}

#[tokio::test]
async fn test_missing_access_token_on_first_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ""
        })))
        .mount(&server)
        .await;

    let client = YetiClient::new(mock_root(&server)).unwrap();
    let err = client
        .authenticate_with_api_key(Some(API_KEY.into()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Integrity { .. }));
    assert!(!client.session().await.is_authenticated());
    assert_eq!(client.auth_method().await, None);
}

#[tokio::test]
async fn test_rejected_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .expect(1)
        .mount(&server)
        .await;

    let result = YetiClient::connect(mock_root(&server), "wrong").await;

    match result {
        Err(Error::Api(err)) => {
            assert_eq!(err.status_code, 401);
            assert_eq!(err.message, "Invalid API key");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// ============================================================================
// Retry Tests
// ============================================================================

#[tokio::test]
async fn test_retry_after_expired_token() {
    let server = MockServer::start().await;
    // Initial exchange plus one refresh per 401.
    mount_token(&server, "T", 3).await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indicators": [{"name": "test"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let body = client.dispatch(search_request(&server).retries(3)).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["indicators"][0]["name"], "test");

    assert_eq!(hits(&server, TOKEN_PATH).await, 3);
    assert_eq!(hits(&server, SEARCH_PATH).await, 3);
}

#[tokio::test]
async fn test_retry_uses_refreshed_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "stale"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"indicators": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();
    assert_eq!(client.session().await.authorization(), Some("Bearer stale"));

    client.dispatch(search_request(&server)).await.unwrap();

    assert_eq!(client.session().await.authorization(), Some("Bearer fresh"));
}

#[tokio::test]
async fn test_retry_exhaustion_raises_auth_error() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 3).await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let err = client
        .dispatch(search_request(&server).retries(2))
        .await
        .unwrap_err();

    match err {
        Error::Auth(err) => assert!(err.message.contains("401 Unauthorized for url: ")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(hits(&server, SEARCH_PATH).await, 3);
}

#[tokio::test]
async fn test_zero_retries_fails_on_first_401() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 1).await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let err = client
        .dispatch(search_request(&server).retries(0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn test_unauthenticated_client_gives_up_without_refreshing() {
    let server = MockServer::start().await;
    mount_token(&server, "unused", 0).await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(4)
        .mount(&server)
        .await;

    let client = YetiClient::new(mock_root(&server)).unwrap();
    let err = client
        .search_indicators(&IndicatorQuery::default().name("test"), Pagination::ALL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert!(err.to_string().contains("401 Unauthorized for url: "));
}

#[tokio::test]
async fn test_failed_refresh_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key revoked"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let err = client.dispatch(search_request(&server)).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
}

#[tokio::test]
async fn test_revoked_key_during_refresh_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = YetiClient::connect(mock_root(&server), API_KEY)
        .await
        .unwrap();

    let err = client
        .dispatch(search_request(&server).retries(2))
        .await
        .unwrap_err();

    match err {
        Error::Auth(err) => assert!(err.message.contains("Invalid API key")),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Error Classification Tests
// ============================================================================

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    let client = connected_client(&server, "T").await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"detail":"bad query"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.dispatch(search_request(&server)).await.unwrap_err();

    match err {
        Error::Api(err) => {
            assert_eq!(err.status_code, 400);
            assert_eq!(err.message, r#"{"detail":"bad query"}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(hits(&server, TOKEN_PATH).await, 1);
}

#[tokio::test]
async fn test_server_error_keeps_text() {
    let server = MockServer::start().await;
    let client = connected_client(&server, "T").await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.dispatch(search_request(&server)).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_not_found_outside_find_is_an_error() {
    let server = MockServer::start().await;
    let client = connected_client(&server, "T").await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tags/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.new_tag("apt", None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_conflicting_bodies_send_nothing() {
    let server = MockServer::start().await;
    let client = YetiClient::new(mock_root(&server)).unwrap();

    let request = search_request(&server).binary(b"raw".to_vec());
    let err = client.dispatch(request).await.unwrap_err();

    assert!(matches!(err, Error::Usage(UsageError::ConflictingBodies)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_search_sends_nothing() {
    let server = MockServer::start().await;
    let client = YetiClient::new(mock_root(&server)).unwrap();

    let err = client
        .search_indicators(&IndicatorQuery::default(), Pagination::ALL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Usage(UsageError::EmptySearch { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let root = yeti::RootUrl::new("http://127.0.0.1:1").unwrap();

    let client = YetiClient::new(root).unwrap();
    let err = client
        .authenticate_with_api_key(Some(API_KEY.into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    let client = connected_client(&server, "T").await;

    Mock::given(method("GET"))
        .and(path("/api/v2/observables/"))
        .and(query_param("value", "http://evil.example/a b"))
        .and(query_param("type", "url"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "9"})))
        .expect(1)
        .mount(&server)
        .await;

    let found = client
        .find_observable("http://evil.example/a b", "url")
        .await
        .unwrap();
    assert_eq!(found.unwrap()["id"], "9");
}

#[tokio::test]
async fn test_request_headers_override_session_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("x-tenant", "override"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"indicators": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = YetiClient::builder(mock_root(&server))
        .default_header("x-tenant", "default")
        .build()
        .unwrap();

    client
        .dispatch(search_request(&server).header("x-tenant", "override"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_body_and_pagination() {
    let server = MockServer::start().await;
    let client = connected_client(&server, "T").await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_json(json!({
            "query": {"name": "test", "type": "yara"},
            "count": 100,
            "page": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indicators": [{"name": "a"}, {"name": "b"}],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .search_indicators(
            &IndicatorQuery::default().name("test").indicator_type("yara"),
            Pagination::first(100),
        )
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.is_last());
    assert_eq!(page.next_page(), None);
}
