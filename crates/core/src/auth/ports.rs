//! Port interface for unauthenticated account operations

use async_trait::async_trait;
use coreshift_domain::{LoginResponse, RegisterRequest, Result};

/// Backend calls that require no bearer token
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /register` with a JSON body.
    async fn register(&self, request: &RegisterRequest) -> Result<()>;

    /// `POST /login` with form-encoded `username`/`password`.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;
}
