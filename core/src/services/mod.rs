//! Services implementing the token engine.

pub mod auth;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthServiceConfig, AuthenticationService, PasswordVerifier};
pub use revocation::{
    hash_token, MemoryRevocationStore, PersistentRevocationStore, RevocationStore,
    RevocationStrategy, RevocationSweeper, SweepConfig, SweepHandle,
};
pub use token::{JwtTokenCodec, TokenCodec, TokenCodecConfig};
