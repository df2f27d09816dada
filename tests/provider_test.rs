//! GroqClient against a mock chat-completions server.

mod common;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yaddoo_chat::model::{ChatProvider, ErrorKind, GroqClient, ProviderError};
use yaddoo_chat::persona::normalize::EMPTY_INPUT_REPLY;
use yaddoo_chat::web::models::{Message, Role};

use common::{completion, test_config, COMPLETIONS_PATH};

fn client_for(server: &MockServer) -> GroqClient {
    let config = test_config(&server.uri(), Some("gsk_test"), "m1");
    GroqClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_success_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": "m1",
            "max_tokens": 260,
            "stop": ["\n\n\n"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("نعم، لا تقلق<|eot_id|>")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.send("m1", "سؤال", &[]).await.unwrap();
    assert_eq!(reply, "ايه، لا تشيل هم");
}

#[tokio::test]
async fn test_message_layout_sent_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("تمام")))
        .mount(&server)
        .await;

    let history: Vec<Message> = (0..15)
        .map(|i| Message::new(Role::Assistant, format!("h{i}")))
        .collect();
    let client = client_for(&server);
    client.send("m1", "الحين", &history).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();

    // system + 3 pairs + 12 history + current message
    assert_eq!(messages.len(), 20);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[7]["content"], "h3");
    assert_eq!(messages[18]["content"], "h14");
    assert_eq!(messages[19], json!({ "role": "user", "content": "الحين" }));
}

#[tokio::test]
async fn test_upstream_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "Invalid API Key" } })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send("m1", "سؤال", &[]).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::UpstreamStatus {
            status: 401,
            body: r#"{"error":{"message":"Invalid API Key"}}"#.to_string(),
        }
    );
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_upstream_text_error_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("ب".repeat(1000)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.send("m1", "سؤال", &[]).await {
        Err(ProviderError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body.chars().count(), 300);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_content_is_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.send("m1", "سؤال", &[]).await.unwrap();
    assert_eq!(reply, EMPTY_INPUT_REPLY);
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send("m1", "سؤال", &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("تمام")))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), None, "m1");
    let client = GroqClient::new(&config).unwrap();
    let err = client.send("m1", "سؤال", &[]).await.unwrap_err();
    assert_eq!(err, ProviderError::MissingCredential);
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Nothing listens on the discard port.
    let config = test_config("http://127.0.0.1:9", Some("gsk_test"), "m1");
    let client = GroqClient::new(&config).unwrap();

    let err = client.send("m1", "سؤال", &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.to_string().starts_with("شبكة/اتصال"));
}
