//! Revocation record stored by the persistent blacklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Where a refresh token was issued to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClientMetadata {
    pub fn new(user_agent: Option<String>, ip_address: Option<String>) -> Self {
        Self {
            user_agent,
            ip_address,
        }
    }
}

/// A tracked token, keyed by the SHA-256 hex digest of the raw token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    pub id: Uuid,

    pub user_id: UserId,

    /// Hex SHA-256 of the raw token; the raw token is never stored
    pub token_hash: String,

    pub expires_at: DateTime<Utc>,

    /// Set once on revocation and never cleared
    pub revoked_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub client: ClientMetadata,
}

impl RevocationRecord {
    pub fn new(
        user_id: UserId,
        token_hash: String,
        expires_at: DateTime<Utc>,
        client: ClientMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            revoked_at: None,
            created_at: Utc::now(),
            client,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Marks the record revoked. Returns false if it already was; the first
    /// revocation time is kept.
    pub fn revoke(&mut self, at: DateTime<Utc>) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        self.revoked_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record() -> RevocationRecord {
        RevocationRecord::new(
            1,
            "ab".repeat(32),
            Utc::now() + Duration::days(7),
            ClientMetadata::default(),
        )
    }

    #[test]
    fn test_revoke_is_monotonic() {
        let mut r = record();
        let first = Utc::now();
        assert!(r.revoke(first));
        assert!(!r.revoke(first + Duration::hours(1)));
        assert_eq!(r.revoked_at, Some(first));
        assert!(r.is_revoked());
    }

    #[test]
    fn test_expiry_is_strict() {
        let r = record();
        assert!(!r.is_expired_at(r.expires_at));
        assert!(r.is_expired_at(r.expires_at + Duration::seconds(1)));
    }
}
