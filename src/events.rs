//! Client events surfaced to the embedding application
//!
//! The API client never touches navigation or UI state directly. Failures are
//! broadcast as events; the composition root subscribes and translates them
//! into whatever the host UI does (toast notification, redirect to login).

/// Events emitted by [`ApiClient`](crate::ApiClient) during request handling
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// A request failed; `message` is the text to show the user transiently.
    /// Emitted for every failure, including 401s.
    ErrorNotification {
        /// Human-readable failure description (server-supplied or generic)
        message: String,
    },

    /// A request was rejected with 401. The session marker is stale and the
    /// user should be taken to the login route.
    SessionExpired,
}
