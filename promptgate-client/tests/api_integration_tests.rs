//! Integration tests for promptgate-client session operations.
//!
//! These tests use wiremock to simulate server responses and verify
//! that the client correctly handles the endpoint contract.

use promptgate_client::{Client, ClientError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION: &str = "3f0c2a4e-8a51-4f0b-9d7e-1c2b3a4d5e6f";

#[tokio::test]
async fn test_update_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt_edit/update"))
        .and(body_json(json!({
            "session_id": SESSION,
            "edited_text": "draft"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    client.update(SESSION, "draft").await.unwrap();
}

#[tokio::test]
async fn test_confirm_unknown_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt_edit/confirm"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "Session not found",
            "code": "E201"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client.confirm(SESSION, "final").await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        ClientError::Api { message, .. } => assert_eq!(message, "Session not found"),
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt_edit/cancel"))
        .and(body_json(json!({"session_id": SESSION})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "Malformed request: missing field `session_id`",
            "code": "E204"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.cancel(SESSION).await;

    match result {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Malformed request"));
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt_edit/confirm"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    match client.confirm(SESSION, "x").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pending_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt_edit/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [
                {
                    "session_id": SESSION,
                    "node_id": "7",
                    "text": "hello",
                    "edited_text": "hello there",
                    "state": "pending",
                    "created_at": "2026-01-01T00:00:00Z"
                },
                {
                    "session_id": "a1b2c3d4-0000-4000-8000-000000000000",
                    "node_id": null,
                    "text": "other",
                    "edited_text": "other",
                    "state": "pending",
                    "created_at": "2026-01-01T00:00:01Z"
                }
            ],
            "count": 2
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let sessions = client.pending().await.unwrap();

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session_id, SESSION);
    assert_eq!(sessions[0].node_id.as_deref(), Some("7"));
    assert_eq!(sessions[0].edited_text, "hello there");
    assert!(sessions[1].node_id.is_none());
}

#[tokio::test]
async fn test_session_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/prompt_edit/sessions/{SESSION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": SESSION,
            "node_id": null,
            "text": "t",
            "edited_text": "t",
            "state": "confirmed",
            "created_at": "2026-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let session = client.session(SESSION).await.unwrap();
    assert_eq!(session.state, "confirmed");
}

#[tokio::test]
async fn test_next_event_timeout_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt_edit/events"))
        .and(query_param("timeout_ms", "250"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let event = client
        .next_event(Duration::from_millis(250))
        .await
        .unwrap();
    assert!(event.is_none());
}

#[tokio::test]
async fn test_next_event_delivers_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt_edit/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "prompt_edit_session",
            "data": {
                "session_id": SESSION,
                "node_id": "12",
                "text": "edit me"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let event = client
        .next_event(Duration::from_secs(1))
        .await
        .unwrap()
        .expect("event");

    assert_eq!(event.session_id, SESSION);
    assert_eq!(event.node_id.as_deref(), Some("12"));
    assert_eq!(event.text, "edit me");
}

#[tokio::test]
async fn test_next_event_rejects_unknown_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt_edit/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "something_else",
            "data": {"session_id": SESSION, "node_id": null, "text": ""}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    assert!(client.next_event(Duration::from_secs(1)).await.is_err());
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt_edit/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "promptgate",
            "sessions": 3,
            "listeners": 1,
            "uptime_secs": 42
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.sessions, 3);
    assert_eq!(health.listeners, 1);
}

#[tokio::test]
async fn test_connection_refused() {
    let client = Client::new("http://127.0.0.1:1").unwrap();
    match client.pending().await {
        Err(ClientError::Http(_)) => {}
        other => panic!("Expected HTTP error, got {other:?}"),
    }
}

#[test]
fn test_invalid_url() {
    assert!(matches!(
        Client::new("ftp://localhost"),
        Err(ClientError::InvalidUrl(_))
    ));
    assert!(Client::new("https://gate.example.com").is_ok());
}
