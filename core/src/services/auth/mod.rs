//! Authentication service module
//!
//! Ties the token codec, a revocation strategy and the user ports together:
//! - Login with username or email and password
//! - Logout and per-token refresh revocation
//! - Refresh token exchange
//! - Access token validation

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::PasswordVerifier;
pub use service::AuthenticationService;
