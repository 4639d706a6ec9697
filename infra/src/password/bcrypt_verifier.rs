//! bcrypt implementation of PasswordVerifier

use async_trait::async_trait;

use ks_core::errors::{DomainError, DomainResult};
use ks_core::services::PasswordVerifier;

/// Password verifier using bcrypt
///
/// Hashing runs on the blocking pool so it does not stall the runtime.
#[derive(Debug, Clone)]
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom work factor (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordVerifier for BcryptPasswordVerifier {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal { message: format!("Password hashing task failed: {}", e) })?
            .map_err(|e| DomainError::Internal { message: format!("Failed to hash password: {}", e) })
    }

    async fn compare(&self, hash: &str, password: &str) -> DomainResult<bool> {
        let hash = hash.to_string();
        let password = password.to_string();

        let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal { message: format!("Password check task failed: {}", e) })?;

        match result {
            Ok(matches) => Ok(matches),
            Err(e) => {
                // Malformed stored hash: treat as a mismatch.
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
