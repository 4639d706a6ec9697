//! Main authentication service implementation

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::revocation::ClientMetadata;
use crate::domain::entities::user::{User, UserId};
use crate::domain::value_objects::{AuthResult, TokenClaims};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserDirectory;
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;
use super::password::PasswordVerifier;

/// Orchestrates login, logout, refresh and token validation
///
/// Holds no locks across calls; all shared state lives behind the ports.
pub struct AuthenticationService {
    /// Account lookup
    users: Arc<dyn UserDirectory>,
    passwords: Arc<dyn PasswordVerifier>,
    codec: Arc<dyn TokenCodec>,
    /// Blacklist consulted on validation and refresh
    revocations: Arc<dyn RevocationStore>,
    config: AuthServiceConfig,
}

impl AuthenticationService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `users` - Directory used to resolve and re-read users
    /// * `passwords` - Verifier for stored password hashes
    /// * `codec` - Signer/verifier for access and refresh tokens
    /// * `revocations` - Blacklist strategy
    /// * `config` - Service configuration
    pub fn new(
        users: Arc<dyn UserDirectory>,
        passwords: Arc<dyn PasswordVerifier>,
        codec: Arc<dyn TokenCodec>,
        revocations: Arc<dyn RevocationStore>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            passwords,
            codec,
            revocations,
            config,
        }
    }

    pub fn revocation_store(&self) -> &Arc<dyn RevocationStore> {
        &self.revocations
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Authenticate with username or email and password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResult)` - A fresh access/refresh pair
    /// * `Err(AuthError::InvalidCredentials)` - Unknown user or wrong password
    /// * `Err(AuthError::UserInactive)` - Account disabled
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResult> {
        self.login_with_client(identifier, password, None).await
    }

    /// Same as [`login`](Self::login), recording where the refresh token went
    pub async fn login_with_client(
        &self,
        identifier: &str,
        password: &str,
        client: Option<ClientMetadata>,
    ) -> DomainResult<AuthResult> {
        let user = self
            .port_call("get_by_username_or_email", self.users.get_by_username_or_email(identifier))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Reported whatever the password.
        if !user.is_active {
            warn!(user_id = user.id, "Login attempt on inactive account");
            return Err(AuthError::UserInactive.into());
        }

        let matches = self
            .port_call("compare", self.passwords.compare(&user.password_hash, password))
            .await?;
        if !matches {
            debug!(user_id = user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let result = self.issue_session(user, &client.unwrap_or_default()).await?;

        if let Err(e) = self
            .port_call("update_last_login_at", self.users.update_last_login_at(result.user.id))
            .await
        {
            warn!(user_id = result.user.id, error = %e, "Failed to update last login time");
        }

        info!(user_id = result.user.id, "User logged in");
        Ok(result)
    }

    /// Revoke the caller's access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - Authenticated caller
    /// * `token` - Access token presented by the caller
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::InvalidToken)` - Token does not verify or belongs to another user
    pub async fn logout(&self, user_id: UserId, token: &str) -> DomainResult<()> {
        let claims = self
            .codec
            .verify_access_token(token)
            .map_err(|_| TokenError::InvalidToken)?;

        if claims.user_id != user_id {
            warn!(user_id, token_owner = claims.user_id, "Logout with another user's token");
            return Err(TokenError::InvalidToken.into());
        }

        self.port_call("revoke", self.revocations.add(token, claims.expires_at()))
            .await?;

        info!(user_id, "User logged out");
        Ok(())
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented refresh token stays valid until its own expiry.
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::RefreshTokenInvalid)` - Token invalid, expired, revoked, or its owner is gone
    /// * `Err(AuthError::UserInactive)` - Account disabled since the token was issued
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthResult> {
        self.refresh_token_with_client(refresh_token, None).await
    }

    pub async fn refresh_token_with_client(
        &self,
        refresh_token: &str,
        client: Option<ClientMetadata>,
    ) -> DomainResult<AuthResult> {
        let claims = self
            .codec
            .verify_refresh_token(refresh_token)
            .map_err(|_| TokenError::RefreshTokenInvalid)?;

        if self
            .port_call("is_revoked", self.revocations.is_revoked(refresh_token))
            .await?
        {
            warn!(user_id = claims.user_id, "Revoked refresh token presented");
            return Err(TokenError::RefreshTokenInvalid.into());
        }

        let user = self
            .port_call("get_by_id", self.users.get_by_id(claims.user_id))
            .await?
            .ok_or(TokenError::RefreshTokenInvalid)?;

        if !user.is_active {
            return Err(AuthError::UserInactive.into());
        }

        let result = self.issue_session(user, &client.unwrap_or_default()).await?;
        debug!(user_id = result.user.id, "Token pair refreshed");
        Ok(result)
    }

    /// Check an access token and return the identity it carries
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::TokenBlacklisted)` - Token was revoked
    /// * `Err(TokenError::InvalidToken)` / `Err(TokenError::TokenExpired)` - Verification failed
    pub async fn validate_token(&self, token: &str) -> DomainResult<TokenClaims> {
        if self
            .port_call("is_revoked", self.revocations.is_revoked(token))
            .await?
        {
            return Err(TokenError::TokenBlacklisted.into());
        }

        let claims = self.codec.verify_access_token(token)?;
        Ok(claims.into())
    }

    /// Revoke one refresh token owned by `user_id`
    pub async fn revoke_refresh_token(&self, user_id: UserId, refresh_token: &str) -> DomainResult<()> {
        let claims = self
            .codec
            .verify_refresh_token(refresh_token)
            .map_err(|_| TokenError::RefreshTokenInvalid)?;

        if claims.user_id != user_id {
            warn!(user_id, token_owner = claims.user_id, "Revocation of another user's refresh token");
            return Err(TokenError::RefreshTokenInvalid.into());
        }

        self.port_call("revoke", self.revocations.add(refresh_token, claims.expires_at()))
            .await?;

        info!(user_id, "Refresh token revoked");
        Ok(())
    }

    /// Revoke every refresh token of `user_id`
    ///
    /// Access tokens already issued stay valid until they expire.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of refresh tokens revoked
    /// * `Err(DomainError::Unsupported)` - The revocation strategy does not track tokens per user
    pub async fn logout_all_devices(&self, user_id: UserId) -> DomainResult<usize> {
        let revoked = self
            .port_call("revoke_all_for_user", self.revocations.revoke_all_for_user(user_id))
            .await?;

        info!(user_id, revoked, "User logged out of all devices");
        Ok(revoked)
    }

    async fn issue_session(&self, user: User, client: &ClientMetadata) -> DomainResult<AuthResult> {
        let access = self
            .codec
            .issue_access_token(user.id, &user.username, &user.email, &user.role)?;
        let refresh = self.codec.issue_refresh_token(user.id)?;

        self.port_call(
            "record_refresh_token",
            self.revocations
                .record_refresh_token(user.id, &refresh.token, refresh.expires_at, client),
        )
        .await?;

        Ok(AuthResult {
            user,
            access_token: access.token,
            refresh_token: refresh.token,
            expires_at: access.expires_at,
        })
    }

    /// Run a port call under the configured timeout
    async fn port_call<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.port_timeout, call).await {
            Ok(result) => result.map_err(|e| port_error(operation, e)),
            Err(_) => {
                warn!(operation, timeout_ms = self.config.port_timeout.as_millis() as u64, "Port call timed out");
                Err(DomainError::Internal {
                    message: format!("{} timed out", operation),
                })
            }
        }
    }
}

/// Storage failures surface as `Internal`; `Unsupported` passes through.
fn port_error(operation: &str, error: DomainError) -> DomainError {
    match error {
        DomainError::Internal { .. } | DomainError::Unsupported { .. } => error,
        other => DomainError::Internal {
            message: format!("{} failed: {}", operation, other),
        },
    }
}
