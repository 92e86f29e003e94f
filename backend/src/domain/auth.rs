//! Authentication primitives: login credentials and registration drafts.
//!
//! Inbound payload parsing stays outside the domain. Handlers hand raw
//! strings to these constructors, which validate them before any port is
//! called.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::{AdminId, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Login name (email or username) was missing or blank once trimmed.
    EmptyLogin,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLogin => write!(f, "login must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `login` is trimmed and non-empty. It holds an email for customers and a
///   username for administrators.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use bookstore::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@x.com ", "p").unwrap();
/// assert_eq!(creds.login(), "a@x.com");
/// assert_eq!(creds.password(), "p");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw login/password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = login.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyLogin);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            login: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email or username used for the account lookup.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Name,
    Email,
    Password,
    Mobile,
    State,
    City,
}

impl RegistrationField {
    /// JSON field name as submitted by clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Mobile => "mobile",
            Self::State => "state",
            Self::City => "city",
        }
    }
}

/// Validation error raised by [`RegistrationDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationValidationError {
    pub missing: Vec<RegistrationField>,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "All fields are required")
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Raw registration inputs; every field may be absent.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub mobile: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Validated registration request.
///
/// ## Invariants
/// - Every field is present and non-blank; text fields are trimmed.
/// - The password is kept verbatim and zeroised on drop.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    name: String,
    email: String,
    password: Zeroizing<String>,
    mobile: String,
    state: String,
    city: String,
}

impl RegistrationDraft {
    /// Validate raw inputs, reporting every missing field at once.
    pub fn try_new(input: RegistrationInput) -> Result<Self, RegistrationValidationError> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, field: RegistrationField, trim: bool| {
            let value = value.unwrap_or_default();
            let value = if trim { value.trim().to_owned() } else { value };
            if value.trim().is_empty() {
                missing.push(field);
            }
            value
        };

        let name = take(input.name, RegistrationField::Name, true);
        let email = take(input.email, RegistrationField::Email, true);
        let password = take(input.password, RegistrationField::Password, false);
        let mobile = take(input.mobile, RegistrationField::Mobile, true);
        let state = take(input.state, RegistrationField::State, true);
        let city = take(input.city, RegistrationField::City, true);

        if !missing.is_empty() {
            return Err(RegistrationValidationError { missing });
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password),
            mobile,
            state,
            city,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Customer profile returned to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub city: String,
}

/// Stored customer account including the password hash.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

/// Customer row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
    pub state: String,
    pub city: String,
}

/// Administrator profile returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
}

/// Stored administrator account including the password hash.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub admin: Admin,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyLogin)]
    #[case("   ", "pw", LoginValidationError::EmptyLogin)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] login: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(login, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    fn complete_input() -> RegistrationInput {
        RegistrationInput {
            name: Some("A".into()),
            email: Some(" a@x.com ".into()),
            password: Some(" p ".into()),
            mobile: Some("1".into()),
            state: Some("S".into()),
            city: Some("C".into()),
        }
    }

    #[rstest]
    fn registration_trims_text_but_keeps_password() {
        let draft = RegistrationDraft::try_new(complete_input()).expect("valid input");
        assert_eq!(draft.email(), "a@x.com");
        assert_eq!(draft.password(), " p ");
    }

    #[rstest]
    fn registration_reports_every_missing_field() {
        let input = RegistrationInput {
            name: Some("  ".into()),
            city: None,
            ..complete_input()
        };
        let err = RegistrationDraft::try_new(input).expect_err("blank fields fail");
        assert_eq!(
            err.missing,
            vec![RegistrationField::Name, RegistrationField::City]
        );
        assert_eq!(err.to_string(), "All fields are required");
    }
}
