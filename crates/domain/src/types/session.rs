//! Session identity types
//!
//! A [`Session`] is the `(token, user)` pair representing an authenticated
//! client. The pair is owned exclusively by the session store; the two halves
//! are never set independently, which is why the store models "no session" as
//! `Option<Session>` rather than two nullable fields.

use serde::{Deserialize, Serialize};

/// Bare account record attached to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Create a user with only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), email: None, id: None, role: None }
    }
}

/// The authenticated `(token, user)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential sent in the `Authorization` header.
    pub token: String,
    pub user: User,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self { token: token.into(), user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_named_has_no_optional_fields() {
        let user = User::named("Asha");
        assert_eq!(user.name, "Asha");
        assert!(user.email.is_none());
        assert!(user.id.is_none());
        assert!(user.role.is_none());
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&User::named("Asha")).unwrap();
        assert_eq!(json, r#"{"name":"Asha"}"#);
    }
}
