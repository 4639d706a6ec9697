//! # Keystone Core
//!
//! Token issuance, validation and revocation engine.
//! This crate contains the domain entities, the ports the engine talks to,
//! the token codec, both revocation strategies and the authentication
//! service that ties them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AccessClaims, AuthResult, ClientMetadata, IssuedToken, RefreshClaims, RevocationRecord,
    TokenClaims, TokenSubject, User, UserId,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    InMemoryRevocationRepository, InMemoryUserDirectory, RevocationRepository, UserDirectory,
};
pub use services::{
    hash_token, AuthServiceConfig, AuthenticationService, JwtTokenCodec, MemoryRevocationStore,
    PasswordVerifier, PersistentRevocationStore, RevocationStore, RevocationStrategy,
    RevocationSweeper, SweepConfig, SweepHandle, TokenCodec, TokenCodecConfig,
};
