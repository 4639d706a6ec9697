//! Authentication and token error kinds
//!
//! These are the only failure kinds the authentication service reports for
//! token and credential problems. Transport mapping happens in the caller.

use thiserror::Error;

/// Credential-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier or password mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is inactive")]
    UserInactive,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token, bad signature, or wrong subject for the requested class
    #[error("Invalid token")]
    InvalidToken,

    /// Signature valid but past `exp`
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been invalidated")]
    TokenBlacklisted,

    /// Refresh token malformed, expired, revoked or its owner is gone
    #[error("Invalid refresh token")]
    RefreshTokenInvalid,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing secret is missing or a known insecure default")]
    InsecureSecret,
}
