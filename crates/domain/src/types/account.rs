//! Account registration and login wire types

use serde::{Deserialize, Serialize};

use super::session::User;

/// Wire body for `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Success body from `POST /login`
///
/// `user` is optional: some backend versions return only the token, in which
/// case the client derives a fallback identity from the login name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_without_user() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"access_token": "tok-123"}"#).unwrap();
        assert_eq!(parsed.access_token, "tok-123");
        assert!(parsed.user.is_none());
    }
}
