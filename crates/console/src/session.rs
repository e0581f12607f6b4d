//! Bearer-token session shared by every gateway call.
//!
//! A [`Session`] is created once per running console and handed to the
//! [`ApiGateway`](crate::gateway::ApiGateway) explicitly. Clones share the
//! same token slot.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Process-wide holder of at most one bearer token.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl Session {
    /// Create an empty (logged-out) session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Store a token, replacing any previous one.
    pub async fn set_token(&self, token: SecretString) {
        *self.token.write().await = Some(token);
        info!("Session token stored");
    }

    /// Drop the token. Calling this on an empty session is a no-op.
    ///
    /// Returns `true` if a token was held.
    pub async fn clear_token(&self) -> bool {
        let had_token = self.token.write().await.take().is_some();
        if had_token {
            info!("Session token cleared");
        }
        had_token
    }

    /// Clear the token only if it is still the one a failed request used.
    ///
    /// A login that completed while the rejected request was in flight keeps
    /// its fresh token.
    pub(crate) async fn invalidate(&self, stale: &SecretString) -> bool {
        let mut slot = self.token.write().await;
        let is_current = slot
            .as_ref()
            .is_some_and(|current| current.expose_secret() == stale.expose_secret());
        if is_current {
            *slot = None;
            info!("Session token invalidated by server");
        } else {
            debug!("Rejected token already replaced; keeping current session");
        }
        is_current
    }

    /// Snapshot of the current token, if any.
    pub(crate) async fn token(&self) -> Option<SecretString> {
        self.token.read().await.clone()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
