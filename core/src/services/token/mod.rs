//! Token codec module
//!
//! Signs and verifies the two token classes issued by the engine:
//! - short-lived access tokens carrying identity and role
//! - longer-lived refresh tokens carrying only the user id
//!
//! The `sub` claim separates the classes; each verifier rejects the other.

mod codec;
mod config;


pub use codec::{JwtTokenCodec, TokenCodec};
pub use config::TokenCodecConfig;
