//! Token revocation
//!
//! Two interchangeable blacklist strategies behind [`RevocationStore`]:
//! - [`MemoryRevocationStore`] keeps revoked tokens in process
//! - [`PersistentRevocationStore`] flags hashed tokens through a repository
//!
//! [`RevocationSweeper`] purges expired entries from either one.

mod memory;
mod persistent;
mod store;
mod sweeper;

#[cfg(test)]
mod tests;

pub use memory::MemoryRevocationStore;
pub use persistent::{hash_token, PersistentRevocationStore};
pub use store::{RevocationStore, RevocationStrategy};
pub use sweeper::{RevocationSweeper, SweepConfig, SweepHandle};
