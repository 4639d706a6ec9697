//! Signing and verification of access and refresh tokens

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use ks_shared::config::auth::{is_insecure_secret, MAX_TOKEN_TTL_SECONDS};

use crate::domain::entities::token::{AccessClaims, IssuedToken, RefreshClaims, TokenSubject};
use crate::domain::entities::user::UserId;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenCodecConfig;

/// Stateless signer/verifier for compact signed tokens
///
/// Implementations hold no mutable state and may be shared freely across
/// tasks.
pub trait TokenCodec: Send + Sync {
    /// Sign an access token for the given identity
    ///
    /// # Returns
    /// * `Ok(IssuedToken)` - Token and its expiry (`now + access_ttl`)
    /// * `Err(DomainError)` - Signing failed
    fn issue_access_token(
        &self,
        user_id: UserId,
        username: &str,
        email: &str,
        role: &str,
    ) -> DomainResult<IssuedToken>;

    /// Sign a refresh token for `user_id`
    fn issue_refresh_token(&self, user_id: UserId) -> DomainResult<IssuedToken>;

    /// Verify an access token and return its claims
    ///
    /// # Returns
    /// * `Err(TokenError::TokenExpired)` - Valid signature, past `exp`
    /// * `Err(TokenError::InvalidToken)` - Bad signature, malformed, or not an access token
    fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims>;

    /// Verify a refresh token and return its claims
    ///
    /// # Returns
    /// * `Err(TokenError::TokenExpired)` - Valid signature, past `exp`
    /// * `Err(TokenError::RefreshTokenInvalid)` - Bad signature, malformed, or not a refresh token
    fn verify_refresh_token(&self, token: &str) -> DomainResult<RefreshClaims>;
}

/// HS256 implementation of [`TokenCodec`]
pub struct JwtTokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl JwtTokenCodec {
    /// Creates a codec, rejecting insecure secrets and out-of-range lifetimes
    ///
    /// # Returns
    /// * `Err(TokenError::InsecureSecret)` - Secret is empty or a known placeholder
    /// * `Err(DomainError::Validation)` - A lifetime is zero, negative or
    ///   longer than [`MAX_TOKEN_TTL_SECONDS`]
    pub fn new(config: TokenCodecConfig) -> DomainResult<Self> {
        if config.access_ttl <= chrono::Duration::zero()
            || config.refresh_ttl <= chrono::Duration::zero()
        {
            return Err(DomainError::Validation {
                message: "token lifetimes must be positive".to_string(),
            });
        }

        let max_ttl = chrono::Duration::seconds(MAX_TOKEN_TTL_SECONDS);
        if config.access_ttl > max_ttl || config.refresh_ttl > max_ttl {
            return Err(DomainError::Validation {
                message: format!("token lifetimes must not exceed {} seconds", MAX_TOKEN_TTL_SECONDS),
            });
        }
        Self::with_unchecked_ttls(config)
    }

    /// Creates a codec without checking lifetimes
    ///
    /// The secret is still checked. A negative lifetime mints tokens that are
    /// already expired, which is only useful in tests.
    pub fn with_unchecked_ttls(config: TokenCodecConfig) -> DomainResult<Self> {
        if config.secret.trim().is_empty() || is_insecure_secret(&config.secret) {
            return Err(TokenError::InsecureSecret.into());
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            access_validation: validation_for(TokenSubject::Access),
            refresh_validation: validation_for(TokenSubject::Refresh),
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn config(&self) -> &TokenCodecConfig {
        &self.config
    }

    fn sign<T: Serialize>(&self, claims: &T) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    fn decode_claims<T: DeserializeOwned>(
        &self,
        token: &str,
        validation: &Validation,
        invalid: TokenError,
    ) -> DomainResult<T> {
        decode::<T>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(invalid),
            })
    }
}

fn validation_for(subject: TokenSubject) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.sub = Some(subject.as_str().to_string());
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

impl TokenCodec for JwtTokenCodec {
    fn issue_access_token(
        &self,
        user_id: UserId,
        username: &str,
        email: &str,
        role: &str,
    ) -> DomainResult<IssuedToken> {
        let claims = AccessClaims::new(
            user_id,
            username,
            email,
            role,
            Utc::now(),
            self.config.access_ttl,
        )
        .ok_or(TokenError::TokenGenerationFailed)?;
        let token = self.sign(&claims)?;
        Ok(IssuedToken::new(token, claims.expires_at()))
    }

    fn issue_refresh_token(&self, user_id: UserId) -> DomainResult<IssuedToken> {
        let claims = RefreshClaims::new(user_id, Utc::now(), self.config.refresh_ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;
        let token = self.sign(&claims)?;
        Ok(IssuedToken::new(token, claims.expires_at()))
    }

    fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims> {
        let claims: AccessClaims =
            self.decode_claims(token, &self.access_validation, TokenError::InvalidToken)?;

        if claims.sub != TokenSubject::Access {
            return Err(TokenError::InvalidToken.into());
        }
        Ok(claims)
    }

    fn verify_refresh_token(&self, token: &str) -> DomainResult<RefreshClaims> {
        let claims: RefreshClaims = self.decode_claims(
            token,
            &self.refresh_validation,
            TokenError::RefreshTokenInvalid,
        )?;

        if claims.sub != TokenSubject::Refresh {
            return Err(TokenError::RefreshTokenInvalid.into());
        }
        Ok(claims)
    }
}
