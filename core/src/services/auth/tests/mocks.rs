//! Mock implementations for testing authentication service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::domain::entities::user::{User, UserId};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{InMemoryUserDirectory, UserDirectory};
use crate::services::auth::PasswordVerifier;

/// Stores passwords as `plain:<password>`
pub struct MockPasswordVerifier;

#[async_trait]
impl PasswordVerifier for MockPasswordVerifier {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        Ok(format!("plain:{}", password))
    }

    async fn compare(&self, hash: &str, password: &str) -> DomainResult<bool> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// Wraps an in-memory directory and can fail or stall on demand
pub struct MockUserDirectory {
    pub inner: InMemoryUserDirectory,
    pub fail_last_login: AtomicBool,
    pub fail_lookups: AtomicBool,
    pub lookup_delay: Option<Duration>,
}

impl MockUserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            inner: InMemoryUserDirectory::with_users(users),
            fail_last_login: AtomicBool::new(false),
            fail_lookups: AtomicBool::new(false),
            lookup_delay: None,
        }
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    async fn before_lookup(&self) -> DomainResult<()> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::NotFound {
                resource: "user table".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn get_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        self.before_lookup().await?;
        self.inner.get_by_username_or_email(identifier).await
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.before_lookup().await?;
        self.inner.get_by_id(id).await
    }

    async fn update_last_login_at(&self, id: UserId) -> Result<(), DomainError> {
        if self.fail_last_login.load(Ordering::SeqCst) {
            return Err(DomainError::internal("connection reset"));
        }
        self.inner.update_last_login_at(id).await
    }
}

pub fn active_user() -> User {
    User::new(1, "alice", "alice@example.com", "plain:correct-horse").with_role("editor")
}

pub fn inactive_user() -> User {
    User::new(2, "bob", "bob@example.com", "plain:battery-staple").deactivated()
}
