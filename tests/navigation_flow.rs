//! End-to-end flow: a 401 response expires the session at the composition
//! root, which clears the marker and re-runs navigation through the guard.

use std::sync::Arc;
use study_client::{
    ApiClient, ClientConfig, ClientEvent, Error, MemorySessionStore, Router, SessionStore,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn session_expiry_routes_back_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "not logged in"})),
        )
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::authenticated("u-1"));
    let router = Router::new(session.clone());
    let client = ApiClient::new(ClientConfig::new(server.uri())).expect("client should build");
    let mut events = client.subscribe();

    // While the marker is present the guard lets the user into the app
    assert_eq!(router.navigate("/tasks"), "/tasks");

    let result: Result<serde_json::Value, _> = client.get("/api/tasks").await;
    assert!(matches!(result, Err(Error::Unauthorized { .. })));

    // The composition root reacts to the broadcast instead of the HTTP layer
    // touching navigation state itself
    let mut expired = false;
    while let Ok(event) = events.try_recv() {
        if event == ClientEvent::SessionExpired {
            session.clear();
            expired = true;
        }
    }
    assert!(expired, "SessionExpired should have been broadcast");

    assert_eq!(router.navigate("/tasks"), "/login");
}
