//! Caller identity decoded from bearer credentials.
//!
//! Handlers never compare role strings. They ask the [`Identity`] for the
//! capability they need and receive either the principal or a ready-made
//! domain error.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Error;

/// Numeric identifier of a registered customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw database identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a pre-provisioned administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminId(i64);

impl AdminId {
    /// Wrap a raw database identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated customer principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrincipal {
    pub id: UserId,
    pub email: String,
}

/// Authenticated administrator principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal {
    pub id: AdminId,
    pub username: String,
}

/// Who is calling.
///
/// # Examples
/// ```
/// use bookstore::domain::{AdminId, AdminPrincipal, ErrorCode, Identity};
///
/// let admin = Identity::Admin(AdminPrincipal { id: AdminId::new(1), username: "root".into() });
/// assert_eq!(admin.require_admin().map(|p| p.id), Ok(AdminId::new(1)));
///
/// let err = Identity::Anonymous.require_admin().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No bearer credential was presented.
    Anonymous,
    /// A customer token was presented and verified.
    User(UserPrincipal),
    /// An administrator token was presented and verified.
    Admin(AdminPrincipal),
}

impl Identity {
    /// Require a customer principal.
    ///
    /// Administrator tokens do not carry a customer id and are refused.
    pub fn require_user(&self) -> Result<&UserPrincipal, Error> {
        match self {
            Self::User(principal) => Ok(principal),
            Self::Anonymous => Err(missing_token()),
            Self::Admin(_) => Err(Error::forbidden(
                "Access denied. Customer account required.",
            )),
        }
    }

    /// Require an administrator principal.
    pub fn require_admin(&self) -> Result<&AdminPrincipal, Error> {
        match self {
            Self::Admin(principal) => Ok(principal),
            Self::Anonymous => Err(missing_token()),
            Self::User(_) => Err(Error::forbidden(
                "Access denied. Admin privileges required.",
            )),
        }
    }
}

fn missing_token() -> Error {
    Error::unauthorized("Access denied. No token provided.")
}
