//! Driving port for registration and login.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Admin, Error, LoginCredentials, RegistrationInput, User, UserId};

/// Bearer token issued to a customer, with their profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSession {
    pub token: String,
    pub user: User,
}

/// Bearer token issued to an administrator, with their profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub token: String,
    pub admin: Admin,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a customer after human verification.
    async fn register(
        &self,
        input: RegistrationInput,
        captcha_token: Option<String>,
    ) -> Result<UserId, Error>;

    async fn login_user(&self, credentials: &LoginCredentials) -> Result<UserSession, Error>;

    async fn login_admin(&self, credentials: &LoginCredentials) -> Result<AdminSession, Error>;
}
