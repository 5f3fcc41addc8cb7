//! Registration and login over the auth gateway
//!
//! Login obtains a token from the backend and hands the `(token, user)` pair
//! to the session store; the store itself never performs the round-trip.

use std::sync::Arc;

use coreshift_domain::{CoreShiftError, RegisterRequest, Result, User};
use tracing::{debug, info};

use super::ports::AuthGateway;
use crate::session::SessionStore;

/// Account service driving the login and register screens.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Register a new account. No session is established; the user logs in
    /// afterwards.
    ///
    /// # Errors
    /// `LocalValidation` when a required field is blank (no request is
    /// made), otherwise whatever the classifier produced for the response.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let blank = [&request.name, &request.phone, &request.email, &request.password]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(CoreShiftError::local_validation("All fields are required"));
        }

        debug!(email = %request.email, "registering account");
        self.gateway.register(request).await?;
        info!(email = %request.email, "account registered");
        Ok(())
    }

    /// Log in and establish the session.
    ///
    /// When the backend omits the `user` object, a fallback identity is
    /// derived from the login name (the part before `@`), matching what the
    /// login screen has always shown.
    ///
    /// # Errors
    /// `LocalValidation` when either field is blank (no request is made);
    /// classified errors otherwise.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CoreShiftError::local_validation(
                "Email/Mobile and Password are required",
            ));
        }

        debug!(username = %username, "logging in");
        let response = self.gateway.login(username, password).await?;

        let user = response.user.unwrap_or_else(|| fallback_user(username));
        self.session.login(response.access_token, user.clone()).await?;

        info!(user = %user.name, "login successful");
        Ok(user)
    }
}

/// Identity shown when the login response carries no user object.
fn fallback_user(username: &str) -> User {
    let name = username.split('@').next().unwrap_or(username).to_string();
    User { name, email: Some(username.to_string()), id: None, role: None }
}
