//! Tests for the completion HTTP client

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/api/v1/documents/autocomplete";

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::new(format!("{}{}", server.uri(), ENDPOINT), Duration::from_secs(5))
        .expect("client should build")
}

#[tokio::test]
async fn test_fetch_returns_autocompleted_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_json(json!({ "text_input": "The experiment shows" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "autocompleted_text": "The experiment shows that temperatures rose significantly."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .fetch("The experiment shows")
        .await
        .unwrap();

    assert_eq!(
        text,
        "The experiment shows that temperatures rose significantly."
    );
}

#[tokio::test]
async fn test_fetch_non_success_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Hello").await.unwrap_err();

    match err {
        ServiceError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "model overloaded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "completion": "x" })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Hello").await.unwrap_err();
    assert!(matches!(err, ServiceError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_network_error() {
    let client = CompletionClient::new(
        "http://127.0.0.1:1/autocomplete".to_string(),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.fetch("Hello").await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_with_cancel_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "autocompleted_text": "never seen"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client_for(&server).fetch_with_cancel("Hello", &cancel).await;
    assert!(matches!(result, Err(ServiceError::Cancelled)));
}

#[tokio::test]
async fn test_fetch_with_cancel_while_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "autocompleted_text": "too late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        trigger.cancel();
    });

    let result = client.fetch_with_cancel("Hello", &cancel).await;
    assert!(matches!(result, Err(ServiceError::Cancelled)));
}

#[test]
fn test_from_config_disabled_is_not_configured() {
    let config = CompletionConfig {
        enabled: false,
        ..CompletionConfig::default()
    };
    let err = CompletionClient::from_config(&config).unwrap_err();
    assert!(matches!(err, ServiceError::NotConfigured(_)));
    assert!(err.to_string().contains("disabled"));
}

#[test]
fn test_from_config_empty_url_is_not_configured() {
    let config = CompletionConfig {
        api_url: "   ".to_string(),
        ..CompletionConfig::default()
    };
    let err = CompletionClient::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("api_url"));
}

#[test]
fn test_from_config_uses_default_endpoint() {
    let client = CompletionClient::from_config(&CompletionConfig::default()).unwrap();
    assert_eq!(client.api_url(), DEFAULT_API_URL);
}

#[test]
fn test_service_error_display() {
    assert_eq!(
        ServiceError::Api {
            code: 429,
            message: "rate limited".to_string()
        }
        .to_string(),
        "API error (429): rate limited"
    );
    assert_eq!(
        ServiceError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(ServiceError::Cancelled.to_string(), "Request cancelled");
}
