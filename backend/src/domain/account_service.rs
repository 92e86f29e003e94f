//! Account service implementing the [`AccountCommand`] driving port.
//!
//! Login failures never reveal whether the account or the password was
//! wrong: both paths return the same message and both pay for one password
//! comparison.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountCommand, AccountRepositoryError, AdminRepository, AdminSession, HumanVerifier,
    PasswordHasher, TokenError, TokenService, UserAccountRepository, UserSession,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, RegistrationDraft, RegistrationInput, UserId,
};

const USER_EXISTS: &str = "User already exists with this email or mobile";
const CAPTCHA_FAILED: &str = "Captcha verification failed";
const INVALID_USER_LOGIN: &str = "Invalid email or password";
const INVALID_ADMIN_LOGIN: &str = "Invalid username or password";

/// Collaborators required by [`AccountService`].
#[derive(Clone)]
pub struct AccountServicePorts {
    pub users: Arc<dyn UserAccountRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub verifier: Arc<dyn HumanVerifier>,
}

/// Registration and login use-cases.
#[derive(Clone)]
pub struct AccountService {
    ports: AccountServicePorts,
}

impl AccountService {
    pub fn new(ports: AccountServicePorts) -> Self {
        Self { ports }
    }

    /// Compare against the stored hash, or burn an equivalent comparison
    /// when the account does not exist.
    async fn password_matches(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self.ports.hasher.verify(password, hash).await,
            None => {
                self.ports.hasher.verify_absent(password).await;
                false
            }
        }
    }
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Duplicate { .. } => Error::invalid_request(USER_EXISTS),
        AccountRepositoryError::Connection { message }
        | AccountRepositoryError::Query { message } => Error::internal(message),
    }
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(
        &self,
        input: RegistrationInput,
        captcha_token: Option<String>,
    ) -> Result<UserId, Error> {
        let draft = RegistrationDraft::try_new(input).map_err(|err| {
            let missing: Vec<&str> = err.missing.iter().map(|field| field.as_str()).collect();
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "missing": missing }))
        })?;

        let captcha_token = captcha_token.unwrap_or_default();
        if !self.ports.verifier.verify(captcha_token.trim()).await {
            warn!(email = draft.email(), "captcha verification failed");
            return Err(Error::invalid_request(CAPTCHA_FAILED));
        }

        if self
            .ports
            .users
            .exists_with_email_or_mobile(draft.email(), draft.mobile())
            .await
            .map_err(map_repository_error)?
        {
            return Err(Error::invalid_request(USER_EXISTS));
        }

        let password_hash = self
            .ports
            .hasher
            .hash(draft.password())
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        let new_user = NewUser {
            name: draft.name().to_owned(),
            email: draft.email().to_owned(),
            mobile: draft.mobile().to_owned(),
            password_hash,
            state: draft.state().to_owned(),
            city: draft.city().to_owned(),
        };
        let user_id = self
            .ports
            .users
            .insert(&new_user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user_id, "user registered");
        Ok(user_id)
    }

    async fn login_user(&self, credentials: &LoginCredentials) -> Result<UserSession, Error> {
        let account = self
            .ports
            .users
            .find_by_email(credentials.login())
            .await
            .map_err(map_repository_error)?;
        let hash = account.as_ref().map(|account| account.password_hash.as_str());
        let matches = self.password_matches(credentials.password(), hash).await;
        let Some(account) = account.filter(|_| matches) else {
            warn!("customer login rejected");
            return Err(Error::unauthorized(INVALID_USER_LOGIN));
        };

        let token = self
            .ports
            .tokens
            .issue_for_user(&account.user)
            .map_err(map_token_error)?;
        info!(user_id = %account.user.id, "customer logged in");
        Ok(UserSession {
            token,
            user: account.user,
        })
    }

    async fn login_admin(&self, credentials: &LoginCredentials) -> Result<AdminSession, Error> {
        let account = self
            .ports
            .admins
            .find_by_username(credentials.login())
            .await
            .map_err(map_repository_error)?;
        let hash = account.as_ref().map(|account| account.password_hash.as_str());
        let matches = self.password_matches(credentials.password(), hash).await;
        let Some(account) = account.filter(|_| matches) else {
            warn!("admin login rejected");
            return Err(Error::unauthorized(INVALID_ADMIN_LOGIN));
        };

        let token = self
            .ports
            .tokens
            .issue_for_admin(&account.admin)
            .map_err(map_token_error)?;
        info!(admin_id = %account.admin.id, "admin logged in");
        Ok(AdminSession {
            token,
            admin: account.admin,
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
