//! Results returned by the authentication service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::AccessClaims;
use crate::domain::entities::user::{User, UserId};

/// Tokens and user info after a successful login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub user: User,

    pub access_token: String,

    pub refresh_token: String,

    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
}

/// Identity decoded from a validated access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AccessClaims> for TokenClaims {
    fn from(claims: AccessClaims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            user_id: claims.user_id,
            username: claims.username,
            email: claims.email,
            role: claims.role,
            expires_at,
        }
    }
}
