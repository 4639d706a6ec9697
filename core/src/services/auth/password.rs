//! Password hashing port

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Hashes and checks passwords
///
/// The algorithm is chosen by the implementation. Hashes are opaque strings
/// stored alongside the user.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// Hash a plaintext password for storage
    async fn hash(&self, password: &str) -> DomainResult<String>;

    /// Check `password` against a stored `hash`
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match, or the hash is not recognised
    /// * `Err(DomainError)` - The verifier itself failed
    async fn compare(&self, hash: &str, password: &str) -> DomainResult<bool>;
}
