//! Driven ports for customer and administrator account persistence.

use async_trait::async_trait;

use crate::domain::{AdminAccount, NewUser, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// A unique constraint (email or mobile) rejected the insert.
        Duplicate { message: String } => "account already exists: {message}",
    }
}

/// Port for customer accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Look up an account by its exact email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, AccountRepositoryError>;

    /// Whether any account already uses the email or the mobile number.
    async fn exists_with_email_or_mobile(
        &self,
        email: &str,
        mobile: &str,
    ) -> Result<bool, AccountRepositoryError>;

    /// Insert a new account and return its generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<UserId, AccountRepositoryError>;
}

/// Port for pre-provisioned administrator accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AccountRepositoryError>;
}
