//! MySQL implementation of the UserDirectory trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ks_core::domain::entities::user::{User, UserId};
use ks_core::errors::DomainError;
use ks_core::repositories::UserDirectory;

/// Reads accounts from the `users` table
pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        Ok(User {
            id: row.try_get::<u64, _>("id").map_err(|e| column("id", e))?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            role: row.try_get("role").map_err(|e| column("role", e))?,
            is_active: row.try_get("is_active").map_err(|e| column("is_active", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| column("last_login_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn get_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, role, is_active, last_login_at, created_at
            FROM users
            WHERE username = ? OR email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find user: {}", e) })?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, role, is_active, last_login_at, created_at
            FROM users
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find user by id: {}", e) })?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update_last_login_at(&self, id: UserId) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to update last login: {}", e) })?;

        Ok(())
    }
}
