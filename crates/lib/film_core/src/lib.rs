//! # film_core
//!
//! Core domain logic for the film inventory: credential storage, password
//! hashing, access/refresh token lifecycle, and camera/lens ownership.

pub mod auth;
pub mod inventory;
pub mod migrate;
pub mod models;
pub mod stores;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
