//! Driven port for issuing and verifying bearer credentials.

use crate::domain::{Admin, Identity, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or verifying bearer tokens.
    pub enum TokenError {
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Signature, structure or claims were rejected.
        Invalid { message: String } => "token rejected: {message}",
        /// The token is past its expiry.
        Expired => "token expired",
    }
}

/// Signs and checks bearer tokens. Verification never touches the store.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue_for_user(&self, user: &User) -> Result<String, TokenError>;

    fn issue_for_admin(&self, admin: &Admin) -> Result<String, TokenError>;

    /// Decode a presented token into the caller's identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
