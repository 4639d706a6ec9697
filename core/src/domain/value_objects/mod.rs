//! Value objects returned across the service boundary.

pub mod auth_result;

pub use auth_result::{AuthResult, TokenClaims};
