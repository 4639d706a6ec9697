//! Revocation repository trait backing the persistent blacklist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::RevocationRecord;
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

/// Persistence port for [`RevocationRecord`]s
///
/// Records are looked up by the SHA-256 hex digest of the raw token.
/// Implementations must never clear `revoked_at` once it is set, and rely on
/// the underlying storage for atomicity of each call.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Store a new record
    ///
    /// # Returns
    /// * `Ok(RevocationRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate hash)
    async fn create(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError>;

    /// Find a record by token hash
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record for this hash
    async fn get_by_hash(&self, token_hash: &str) -> Result<Option<RevocationRecord>, DomainError>;

    /// Set `revoked_at = now` on the matching record if it is not already revoked
    ///
    /// # Returns
    /// * `Ok(true)` - A record was revoked by this call
    /// * `Ok(false)` - No record, or it was already revoked
    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every non-revoked record owned by `user_id`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    async fn revoke_all_by_user_id(&self, user_id: UserId) -> Result<usize, DomainError>;

    /// Delete every record whose `expires_at` is before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
