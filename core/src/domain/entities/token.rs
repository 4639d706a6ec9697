//! Claims carried inside signed access and refresh tokens.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Token class, carried in the `sub` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSubject {
    Access,
    Refresh,
}

impl TokenSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSubject::Access => "access",
            TokenSubject::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
    pub sub: TokenSubject,
    /// Unique token id; keeps tokens minted in the same second distinct
    pub jti: String,
}

impl AccessClaims {
    /// Returns `None` when `issued_at + ttl` is out of range
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self {
            user_id,
            username: username.into(),
            email: email.into(),
            role: role.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            sub: TokenSubject::Access,
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }
}

/// Payload of a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: UserId,
    pub iat: i64,
    pub exp: i64,
    pub sub: TokenSubject,
    pub jti: String,
}

impl RefreshClaims {
    /// Returns `None` when `issued_at + ttl` is out of range
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self {
            user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            sub: TokenSubject::Refresh,
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

/// A freshly signed token together with its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }
}

fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
