//! MySQL repository implementations

mod revocation_repository_impl;
mod user_directory_impl;

pub use revocation_repository_impl::MySqlRevocationRepository;
pub use user_directory_impl::MySqlUserDirectory;
