//! Integration tests for HttpInferenceClient.
//!
//! Uses wiremock for HTTP mocking. Covers the request body shape and the
//! status mapping (2xx / non-2xx / unreachable / timeout / non-JSON body).

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use verilint_core::config::InferenceConfig;
use verilint_core::{HttpInferenceClient, InferenceClient, InferenceError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(mock_server: &MockServer) -> InferenceConfig {
    InferenceConfig {
        endpoint: format!("{}/api/chat", mock_server.uri()),
        model: "test-model".into(),
        timeout_secs: 5,
        ..InferenceConfig::default()
    }
}

#[tokio::test]
async fn test_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 2048,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "RESULT: [NO]" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpInferenceClient::new(config_for(&mock_server)).expect("client");
    let body = client.complete("check this").await.expect("complete failed");
    assert_eq!(body["message"]["content"], "RESULT: [NO]");
}

#[tokio::test]
async fn test_complete_sends_system_and_user_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": { "content": "" } })))
        .mount(&mock_server)
        .await;

    let client = HttpInferenceClient::new(config_for(&mock_server)).expect("client");
    client.complete("PROMPT TEXT").await.expect("complete failed");

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    let messages = sent["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "PROMPT TEXT /no_think");
}

#[tokio::test]
async fn test_complete_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = HttpInferenceClient::new(config_for(&mock_server)).expect("client");
    let err = client.complete("x").await.unwrap_err();

    assert_eq!(err, InferenceError::Server { status: 500 });
    assert_eq!(err.to_string(), "Request failed with status code: 500");
}

#[tokio::test]
async fn test_complete_not_found_is_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HttpInferenceClient::new(config_for(&mock_server)).expect("client");
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::Server { status: 404 }));
}

#[tokio::test]
async fn test_complete_invalid_json_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let client = HttpInferenceClient::new(config_for(&mock_server)).expect("client");
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::Unexpected { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Unexpected error: "));
}

#[tokio::test]
async fn test_complete_unreachable_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .expect("bind")
        .port();
    let config = InferenceConfig {
        endpoint: format!("http://127.0.0.1:{port}/api/chat"),
        timeout_secs: 5,
        ..InferenceConfig::default()
    };

    let client = HttpInferenceClient::new(config).expect("client");
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::Network { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Network request failed: "));
}

#[tokio::test]
async fn test_complete_timeout_before_headers_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": { "content": "RESULT: [NO]" } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = InferenceConfig {
        timeout_secs: 1,
        ..config_for(&mock_server)
    };
    let client = HttpInferenceClient::new(config).expect("client");
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_complete_timeout_while_reading_body_is_network_error() {
    // Headers promise 100 bytes, only a few arrive, then the connection stalls.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 64 * 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"mes",
            )
            .await
            .expect("write");
        socket.flush().await.expect("flush");
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let config = InferenceConfig {
        endpoint: format!("http://{addr}/api/chat"),
        timeout_secs: 1,
        ..InferenceConfig::default()
    };
    let client = HttpInferenceClient::new(config).expect("client");
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, InferenceError::Network { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Network request failed: "));

    server.abort();
}
