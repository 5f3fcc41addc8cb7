//! In-memory session state over a durable persistence port
//!
//! Holds the authenticated user's identity and bearer token, restores them
//! across restarts, and exposes login/logout/is-authenticated to every view.
//!
//! None of the operations here touch the network and none validate the
//! token: session expiry is detected downstream by consumers of the token
//! (lazy validation, a deliberate latency tradeoff).

use std::sync::Arc;

use coreshift_domain::{Result, Session, User};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ports::SessionPersistence;

/// Single source of truth for the authenticated `(token, user)` pair.
///
/// Constructed once at application start and passed by reference to every
/// controller; never a hidden process-wide singleton.
pub struct SessionStore {
    persistence: Arc<dyn SessionPersistence>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self { persistence, current: RwLock::new(None) }
    }

    /// Restore the persisted session, if any. Called on startup.
    ///
    /// A corrupt or unreadable entry is treated as "not logged in": the
    /// entry is cleared best-effort and no error is surfaced. The restored
    /// token is not validated against the backend here.
    ///
    /// Returns `true` when a session was restored.
    pub async fn initialize(&self) -> bool {
        match self.persistence.load().await {
            Ok(Some(session)) => {
                info!(user = %session.user.name, "restored persisted session");
                *self.current.write().await = Some(session);
                true
            }
            Ok(None) => {
                debug!("no persisted session found");
                false
            }
            Err(err) => {
                warn!(error = %err, "persisted session unreadable, clearing it");
                if let Err(clear_err) = self.persistence.clear().await {
                    warn!(error = %clear_err, "failed to clear corrupt session entry");
                }
                false
            }
        }
    }

    /// Record a successful login.
    ///
    /// Unconditionally overwrites in-memory state and durable storage with
    /// the given pair. Assumes the caller already obtained a valid token
    /// from the backend; no round-trip happens here. Persistence completes
    /// before this returns.
    pub async fn login(&self, token: impl Into<String>, user: User) -> Result<()> {
        let session = Session::new(token, user);
        self.persistence.save(&session).await?;

        info!(user = %session.user.name, "session established");
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Clear the session. Idempotent: logging out while logged out is a
    /// no-op. In-memory state is cleared even if storage removal fails.
    pub async fn logout(&self) -> Result<()> {
        let had_session = self.current.write().await.take().is_some();
        if had_session {
            info!("session cleared (logged out)");
        }
        self.persistence.clear().await
    }

    /// `true` iff both token and user are present.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Current bearer token, if logged in.
    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Current user identity, if logged in.
    pub async fn user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Snapshot of the full session, if logged in.
    pub async fn session(&self) -> Option<Session> {
        self.current.read().await.clone()
    }
}
