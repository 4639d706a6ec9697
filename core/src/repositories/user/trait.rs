//! User directory trait: the engine's read-mostly view of user accounts.

use async_trait::async_trait;

use crate::domain::entities::user::{User, UserId};
use crate::errors::DomainError;

/// Lookup port for user accounts
///
/// The authentication engine never creates or edits users. It resolves a
/// login identifier, re-reads users on refresh and stamps the last login.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by username or email
    ///
    /// # Arguments
    /// * `identifier` - Username or email address as typed by the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user matches the identifier
    /// * `Err(DomainError)` - Directory unavailable
    async fn get_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this id
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Record a successful login at the current time
    async fn update_last_login_at(&self, id: UserId) -> Result<(), DomainError>;
}
