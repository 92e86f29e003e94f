//! Driven port for password hashing.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    pub enum PasswordHashError {
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Slow, salted password hashing.
///
/// Implementations keep the hashing work off the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string for storage.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Whether `password` matches `stored_hash`. Malformed hashes never match.
    async fn verify(&self, password: &str, stored_hash: &str) -> bool;

    /// Spend the cost of one [`verify`](Self::verify) when there is no stored
    /// hash to compare against, so unknown accounts take as long as wrong
    /// passwords.
    async fn verify_absent(&self, password: &str);
}
