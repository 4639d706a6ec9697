//! Persistence ports used by the authentication engine.

pub mod revocation;
pub mod user;

pub use revocation::{InMemoryRevocationRepository, RevocationRepository};
pub use user::{InMemoryUserDirectory, UserDirectory};
