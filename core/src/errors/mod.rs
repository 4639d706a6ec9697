//! Domain error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use ks_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The configured revocation strategy cannot perform this operation
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Build an internal error from any displayable failure
    pub fn internal(message: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Unsupported { .. } => error_codes::UNSUPPORTED,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::UserInactive) => error_codes::USER_INACTIVE,
            DomainError::Token(TokenError::InvalidToken) => error_codes::INVALID_TOKEN,
            DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(TokenError::TokenBlacklisted) => error_codes::TOKEN_BLACKLISTED,
            DomainError::Token(TokenError::RefreshTokenInvalid) => {
                error_codes::REFRESH_TOKEN_INVALID
            }
            DomainError::Token(TokenError::TokenGenerationFailed)
            | DomainError::Token(TokenError::InsecureSecret) => error_codes::INTERNAL_ERROR,
        }
    }

    /// True for the token kinds (`InvalidToken`, `TokenExpired`, `TokenBlacklisted`)
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::InvalidToken | TokenError::TokenExpired | TokenError::TokenBlacklisted
            )
        )
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        // Internal details stay in the logs.
        let message = match self {
            DomainError::Internal { .. } => "Internal error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse::new(self.code(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_codes() {
        let err: DomainError = TokenError::TokenBlacklisted.into();
        assert_eq!(err.code(), "TOKEN_BLACKLISTED");
        assert!(err.is_token_rejection());

        let err: DomainError = TokenError::RefreshTokenInvalid.into();
        assert_eq!(err.code(), "REFRESH_TOKEN_INVALID");
        assert!(!err.is_token_rejection());
    }

    #[test]
    fn test_auth_error_display_is_transparent() {
        let err: DomainError = AuthError::UserInactive.into();
        assert_eq!(err.to_string(), "User account is inactive");
        assert_eq!(err.code(), "USER_INACTIVE");
    }

    #[test]
    fn test_internal_error_response_hides_details() {
        let err = DomainError::internal("connection refused at 10.0.0.4:3306");
        let response = err.to_error_response();
        assert_eq!(response.error, "INTERNAL_ERROR");
        assert!(!response.message.contains("10.0.0.4"));
    }
}
