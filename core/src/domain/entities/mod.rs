//! Domain entities: users, token claims and revocation records.

pub mod revocation;
pub mod token;
pub mod user;

pub use revocation::{ClientMetadata, RevocationRecord};
pub use token::{AccessClaims, IssuedToken, RefreshClaims, TokenSubject};
pub use user::{User, UserId};
