//! API client wrapper
//!
//! Wraps `reqwest` with the application's fixed transport policy: a single
//! base address, a 10-second deadline, and a cookie store so every request
//! carries session credentials. Successful responses are unwrapped to the
//! payload body; failures are mapped to the error taxonomy in
//! [`crate::error`] and additionally broadcast as [`ClientEvent`]s so the UI
//! can show a transient notification (and, on 401, navigate to login)
//! without the HTTP layer reaching into navigation state.

use crate::config::ClientConfig;
use crate::error::{Error, GENERIC_CONNECTION_ERROR, Result};
use crate::events::ClientEvent;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Request-side extension point, applied to every outgoing request before it
/// is sent. The default hook is a pass-through; the intended future use is
/// injecting an `Authorization` header once token auth lands.
pub type RequestHook = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Capacity of the event broadcast channel. Events are fire-and-forget;
/// a slow subscriber loses old notifications rather than blocking requests.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Conventional error body returned by the backend: `{"error": "..."}`.
/// The field is optional — some failures carry no message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client pre-configured for the study-management backend
///
/// # Example
///
/// ```no_run
/// use study_client::{ApiClient, ClientConfig, ClientEvent};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Profile { name: String }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ClientConfig::from_env()?)?;
///
/// // The composition root subscribes and translates events into UI actions
/// let mut events = client.subscribe();
/// tokio::spawn(async move {
///     while let Ok(event) = events.recv().await {
///         match event {
///             ClientEvent::ErrorNotification { message } => println!("toast: {message}"),
///             ClientEvent::SessionExpired => println!("navigate to /login"),
///         }
///     }
/// });
///
/// let profile: Profile = client.get("/api/profile").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    request_hook: RequestHook,
    event_tx: broadcast::Sender<ClientEvent>,
}

impl ApiClient {
    /// Create a client for the given configuration.
    ///
    /// The underlying transport is built once with the base address, the
    /// configured deadline, and an enabled cookie store (session cookies are
    /// sent and stored automatically).
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_hook: Arc::new(|builder| builder),
            event_tx,
        })
    }

    /// Replace the request-side hook applied to every outgoing request.
    pub fn with_request_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        self.request_hook = Arc::new(hook);
        self
    }

    /// Subscribe to client events (error notifications, session expiry).
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.event_tx.subscribe()
    }

    /// Send a request and return the unwrapped payload body.
    ///
    /// This is the single underlying entry point; [`get`](Self::get),
    /// [`post`](Self::post), [`put`](Self::put) and
    /// [`delete`](Self::delete) are conveniences over it.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await
    }

    /// GET `path` and deserialize the payload body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path` and deserialize the payload body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT `body` as JSON to `path` and deserialize the payload body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE `path` and deserialize the payload body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }

    /// Execute a prepared request: apply the hook, send, unwrap or map the
    /// failure. Every failure emits a notification event before the error is
    /// returned, so the caller can still branch on the rejection.
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let builder = (self.request_hook)(builder);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "transport failure");
                self.emit_error(GENERIC_CONNECTION_ERROR);
                return Err(Error::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        tracing::warn!(status = status.as_u16(), message = %message, "request failed");
        self.emit_error(&message);

        if status == StatusCode::UNAUTHORIZED {
            self.event_tx.send(ClientEvent::SessionExpired).ok();
            Err(Error::Unauthorized { message })
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn emit_error(&self, message: &str) {
        self.event_tx
            .send(ClientEvent::ErrorNotification {
                message: message.to_string(),
            })
            .ok();
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Pull the human-readable message out of the conventional error body,
/// falling back to the generic connection-failure text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| GENERIC_CONNECTION_ERROR.to_string())
}
