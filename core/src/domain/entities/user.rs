//! User as seen by the authentication engine.
//!
//! The full account model lives behind the `UserDirectory` port; this is the
//! slice of it the engine needs to authenticate and mint claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier assigned by the user directory
pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    pub username: String,

    pub email: String,

    /// Opaque hash understood by the configured `PasswordVerifier`
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role name embedded in access tokens (e.g. "admin", "editor", "user")
    pub role: String,

    /// Disabled accounts cannot log in or refresh
    pub is_active: bool,

    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates an active user with the default "user" role
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: String::from("user"),
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// True when `identifier` is this user's username or email (case-insensitive email)
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.username == identifier || self.email.eq_ignore_ascii_case(identifier)
    }

    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }
}
