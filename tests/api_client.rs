//! Integration tests for the API client wrapper against a mock HTTP server.

use serde::Deserialize;
use std::time::Duration;
use study_client::{ApiClient, ClientConfig, ClientEvent, Error, Method};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Profile {
    id: u64,
    name: String,
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri())).expect("client should build")
}

#[tokio::test]
async fn success_returns_unwrapped_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Alex"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile: Profile = client.get("/api/profile").await.expect("request should succeed");

    // The caller sees the payload body, not the transport envelope
    assert_eq!(
        profile,
        Profile {
            id: 7,
            name: "Alex".to_string()
        }
    );
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(serde_json::json!({
            "subject": "Math",
            "title": "HW1",
            "type": "homework"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created: serde_json::Value = client
        .post(
            "/api/tasks",
            &serde_json::json!({
                "subject": "Math",
                "title": "HW1",
                "type": "homework"
            }),
        )
        .await
        .expect("request should succeed");

    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn error_body_message_is_surfaced_and_broadcast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"error": "title is required"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client.subscribe();

    let result: Result<serde_json::Value, _> = client
        .post("/api/tasks", &serde_json::json!({"subject": "Math"}))
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "title is required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    assert_eq!(
        events.try_recv().expect("notification should be broadcast"),
        ClientEvent::ErrorNotification {
            message: "title is required".to_string()
        }
    );
}

#[tokio::test]
async fn missing_error_field_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/report"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client.subscribe();

    let result: Result<serde_json::Value, _> = client.get("/api/report").await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "server connection failed");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    assert!(matches!(
        events.try_recv(),
        Ok(ClientEvent::ErrorNotification { .. })
    ));
}

#[tokio::test]
async fn unauthorized_emits_notification_and_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "not logged in"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client.subscribe();

    let result: Result<serde_json::Value, _> = client.get("/api/profile").await;
    match result {
        Err(Error::Unauthorized { message }) => assert_eq!(message, "not logged in"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }

    assert_eq!(
        events.try_recv().expect("notification should be broadcast"),
        ClientEvent::ErrorNotification {
            message: "not logged in".to_string()
        }
    );
    assert_eq!(
        events.try_recv().expect("session expiry should be broadcast"),
        ClientEvent::SessionExpired
    );
}

#[tokio::test]
async fn unauthorized_is_mapped_regardless_of_method_and_path() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);

    for (http_method, request_path) in [
        (Method::GET, "/api/tasks"),
        (Method::POST, "/api/tasks"),
        (Method::PUT, "/api/tasks/1"),
        (Method::DELETE, "/api/settings"),
    ] {
        let mut events = client.subscribe();
        let result: Result<serde_json::Value, _> = client
            .request(http_method.clone(), request_path, Some(&serde_json::json!({})))
            .await;

        assert!(
            matches!(result, Err(Error::Unauthorized { .. })),
            "{http_method} {request_path} should map to Unauthorized"
        );
        assert!(matches!(
            events.try_recv(),
            Ok(ClientEvent::ErrorNotification { .. })
        ));
        assert!(matches!(events.try_recv(), Ok(ClientEvent::SessionExpired)));
    }
}

#[tokio::test]
async fn request_hook_is_applied_to_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server)
        .with_request_hook(|builder| builder.header("Authorization", "Bearer test-token"));

    let body: serde_json::Value = client.get("/api/profile").await.expect("hook should match");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn deadline_overrun_rejects_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(server.uri());
    config.timeout = Duration::from_millis(50);
    let client = ApiClient::new(config).expect("client should build");
    let mut events = client.subscribe();

    let result: Result<serde_json::Value, _> = client.get("/api/slow").await;
    match result {
        Err(Error::Network(e)) => assert!(e.is_timeout(), "expected a timeout, got {e:?}"),
        other => panic!("expected Network error, got {other:?}"),
    }

    // Downstream a timeout looks exactly like any other transport failure
    assert_eq!(
        events.try_recv().expect("notification should be broadcast"),
        ClientEvent::ErrorNotification {
            message: "server connection failed".to_string()
        }
    );
}

#[tokio::test]
async fn transport_failure_rejects_with_generic_notification() {
    // Nothing listens on this port; the connection is refused
    let client =
        ApiClient::new(ClientConfig::new("http://127.0.0.1:1")).expect("client should build");
    let mut events = client.subscribe();

    let result: Result<serde_json::Value, _> = client.get("/api/profile").await;
    assert!(matches!(result, Err(Error::Network(_))));

    assert_eq!(
        events.try_recv().expect("notification should be broadcast"),
        ClientEvent::ErrorNotification {
            message: "server connection failed".to_string()
        }
    );
}
