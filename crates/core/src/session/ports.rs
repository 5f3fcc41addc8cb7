//! Port interface for durable session storage
//!
//! The store persists the bearer token and serialized user as a pair: both
//! written together on login, both removed together on logout. The concrete
//! medium (files, keychain, browser storage) lives in infrastructure.

use async_trait::async_trait;
use coreshift_domain::{Result, Session};

/// Durable storage for the `(token, user)` pair
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Read the persisted session, if any.
    ///
    /// Returns `Ok(None)` when nothing is stored. A corrupt entry is an
    /// `Err`; the store treats it as absent and clears it.
    async fn load(&self) -> Result<Option<Session>>;

    /// Persist the session, replacing whatever was stored before.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove both entries. Must succeed when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
