//! Session marker storage
//!
//! The application treats authentication as a boolean proxy: a user id is
//! present in durable client storage, or it is not. The navigation guard
//! re-reads the marker on every navigation, so the storage seam is a trait
//! the host implements over whatever persistence it has (browser storage,
//! keychain, a file). [`MemorySessionStore`] covers embedding and tests.

use std::sync::Mutex;

/// Access to the durable session marker.
///
/// Only presence matters — no expiry, structure, or refresh semantics are
/// attached to the value.
pub trait SessionStore: Send + Sync {
    /// Current session marker, if any. Called on every navigation attempt;
    /// implementations must return the live value, not a cached one.
    fn user_id(&self) -> Option<String>;

    /// Store the marker (login flow).
    fn set_user_id(&self, user_id: &str);

    /// Remove the marker (logout flow).
    fn clear(&self);
}

/// In-memory [`SessionStore`] backed by a mutex
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user_id: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty (anonymous) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a marker.
    pub fn authenticated(user_id: &str) -> Self {
        let store = Self::new();
        store.set_user_id(user_id);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn user_id(&self) -> Option<String> {
        self.user_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set_user_id(&self, user_id: &str) {
        *self
            .user_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(user_id.to_string());
    }

    fn clear(&self) {
        *self
            .user_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}
