//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - `RevocationRepository` over the `refresh_tokens` table
//! - `UserDirectory` over the `users` table

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlRevocationRepository, MySqlUserDirectory};
