//! HS256 bearer tokens backed by `jsonwebtoken`.
//!
//! Expiry is checked against the injected [`Clock`] rather than the library's
//! system-time validation so token lifetimes are testable.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{Admin, AdminId, AdminPrincipal, Identity, User, UserId, UserPrincipal};

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    role: Role,
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_identity(self) -> Result<Identity, TokenError> {
        let id: i64 = self
            .sub
            .parse()
            .map_err(|_| TokenError::invalid("subject is not a numeric id"))?;
        match (self.role, self.email, self.username) {
            (Role::User, Some(email), _) => Ok(Identity::User(UserPrincipal {
                id: UserId::new(id),
                email,
            })),
            (Role::Admin, _, Some(username)) => Ok(Identity::Admin(AdminPrincipal {
                id: AdminId::new(id),
                username,
            })),
            (Role::User, None, _) => Err(TokenError::invalid("user token without email")),
            (Role::Admin, _, None) => Err(TokenError::invalid("admin token without username")),
        }
    }
}

/// Signs and verifies HS256 tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_owned(), "sub".to_owned()]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    fn sign(
        &self,
        sub: String,
        email: Option<String>,
        username: Option<String>,
        role: Role,
    ) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub,
            email,
            username,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue_for_user(&self, user: &User) -> Result<String, TokenError> {
        self.sign(user.id.to_string(), Some(user.email.clone()), None, Role::User)
    }

    fn issue_for_admin(&self, admin: &Admin) -> Result<String, TokenError> {
        self.sign(
            admin.id.to_string(),
            None,
            Some(admin.username.clone()),
            Role::Admin,
        )
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        data.claims.into_identity()
    }
}
