//! MySQL implementation of the RevocationRepository trait.
//!
//! Records live in `refresh_tokens`:
//! `id CHAR(36)`, `user_id BIGINT UNSIGNED`, `token_hash CHAR(64) UNIQUE`,
//! `expires_at`, `revoked_at NULL`, `created_at`, `user_agent NULL`,
//! `ip_address NULL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ks_core::domain::entities::revocation::{ClientMetadata, RevocationRecord};
use ks_core::domain::entities::user::UserId;
use ks_core::errors::DomainError;
use ks_core::repositories::RevocationRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, token_hash, expires_at, revoked_at, created_at, user_agent, ip_address
    FROM refresh_tokens
"#;

/// MySQL implementation of RevocationRepository
///
/// `revoked_at` is only ever written where it is still NULL.
pub struct MySqlRevocationRepository {
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RevocationRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RevocationRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(RevocationRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid record UUID: {}", e) })?,
            user_id: row
                .try_get::<u64, _>("user_id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get token_hash: {}", e) })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get expires_at: {}", e) })?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get revoked_at: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            client: ClientMetadata {
                user_agent: row
                    .try_get("user_agent")
                    .map_err(|e| DomainError::Internal { message: format!("Failed to get user_agent: {}", e) })?,
                ip_address: row
                    .try_get("ip_address")
                    .map_err(|e| DomainError::Internal { message: format!("Failed to get ip_address: {}", e) })?,
            },
        })
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn create(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, expires_at, revoked_at, created_at, user_agent, ip_address
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id)
            .bind(&record.token_hash)
            .bind(record.expires_at)
            .bind(record.revoked_at)
            .bind(record.created_at)
            .bind(&record.client.user_agent)
            .bind(&record.client.ip_address)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Validation {
                    message: "Revocation record already exists".to_string(),
                },
                e => DomainError::Internal {
                    message: format!("Failed to save revocation record: {}", e),
                },
            })?;

        Ok(record)
    }

    async fn get_by_hash(&self, token_hash: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let query = format!("{} WHERE token_hash = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find revocation record: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE token_hash = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to revoke token: {}", e) })?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_by_user_id(&self, user_id: UserId) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE user_id = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to revoke user tokens: {}", e) })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to delete expired tokens: {}", e) })?;

        let deleted = result.rows_affected() as usize;
        if deleted > 0 {
            tracing::debug!(deleted, "Deleted expired revocation records");
        }
        Ok(deleted)
    }
}
