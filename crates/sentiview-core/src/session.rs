//! Session-token storage shared by every outgoing request.
//!
//! The store holds at most one bearer token. It is created empty, set on
//! successful login, read on every outgoing call, and cleared either
//! explicitly on logout or through [`SessionStore::invalidate`] when any
//! backend reports an authentication failure. The store is passed into the
//! gateway client explicitly so the client stays testable in isolation.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Opaque bearer credential representing an authenticated user session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

// Credentials must not leak into logs; only a short prefix is shown.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "SessionToken({prefix}…)")
    }
}

/// Observer notified when the session is globally invalidated.
///
/// In the browser-facing product this is where "force navigation to the
/// login entry point" happens; SDK consumers register whatever teardown
/// they need.
#[async_trait]
pub trait SessionExpiryHandler: Send + Sync {
    async fn on_session_expired(&self);
}

/// Process-wide holder of the single active session token.
///
/// Cloning is cheap and every clone observes the same token. All access
/// goes through async locks; there is no cross-request ordering guarantee
/// beyond the atomicity of each individual operation.
#[derive(Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<SessionToken>>>,
    handlers: Arc<RwLock<Vec<Arc<dyn SessionExpiryHandler>>>>,
}

impl SessionStore {
    /// Creates an empty store with no registered expiry handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for global session invalidation.
    pub async fn on_expired(&self, handler: Arc<dyn SessionExpiryHandler>) {
        self.handlers.write().await.push(handler);
    }

    /// Stores the active token, replacing any previous one.
    pub async fn set(&self, token: impl Into<SessionToken>) {
        let token = token.into();
        tracing::debug!("[Session] token stored: {:?}", token);
        *self.token.write().await = Some(token);
    }

    /// Discards the active token without notifying expiry handlers.
    ///
    /// Used on explicit logout; a missing token is not an error.
    pub async fn clear(&self) {
        let mut guard = self.token.write().await;
        if guard.take().is_some() {
            tracing::debug!("[Session] token cleared");
        }
    }

    /// Returns a copy of the active token, if one is held.
    pub async fn current(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    /// Whether a token is currently held.
    pub async fn is_present(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Global session invalidation: discards the token and notifies every
    /// registered handler exactly once per call.
    ///
    /// Invoked by the gateway for each authentication-failure response,
    /// whichever backend produced it. Handlers run even when no token was
    /// held, so each failing response yields exactly one notification.
    pub async fn invalidate(&self) {
        self.clear().await;
        tracing::warn!("[Session] session invalidated");
        let handlers: Vec<_> = self.handlers.read().await.clone();
        for handler in handlers {
            handler.on_session_expired().await;
        }
    }
}
