//! Port interface for profile operations
//!
//! The gateway owns the transport detail (JSON vs multipart per
//! [`ProfilePayload`] variant) and classifies non-2xx responses through the
//! error classifier before returning.

use async_trait::async_trait;
use coreshift_domain::{Profile, ProfilePayload, Result};

/// Authenticated profile endpoints
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// `GET /profiles`. A 404 is not an error: it means the profile does
    /// not exist yet and maps to `Ok(None)`.
    async fn fetch_profile(&self, token: &str) -> Result<Option<Profile>>;

    /// `POST /profiles/create`.
    async fn create_profile(&self, token: &str, payload: &ProfilePayload) -> Result<()>;

    /// `PUT /profiles/update-profile`.
    async fn update_profile(&self, token: &str, payload: &ProfilePayload) -> Result<()>;
}
