//! Bearer-token extractors used by HTTP handlers.
//!
//! Handlers state the capability they need by extractor type:
//! [`CallerUser`] for customer routes and [`CallerAdmin`] for admin routes.
//! Both resolve the [`Identity`] through the configured token service.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::ports::TokenError;
use crate::domain::{AdminPrincipal, Error, Identity, UserPrincipal};
use crate::inbound::http::state::HttpState;

const INVALID_TOKEN: &str = "Invalid token.";

/// Resolve the caller's identity from the `Authorization` header.
///
/// A missing header yields [`Identity::Anonymous`]; a present but malformed,
/// expired or forged token is rejected with `401`.
fn identity_from_request(req: &HttpRequest) -> Result<Identity, Error> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(Identity::Anonymous);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))?;

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    state.tokens.verify(token).map_err(|err| {
        warn!(error = %err, "bearer token rejected");
        match err {
            TokenError::Expired => Error::unauthorized("Token expired."),
            TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                Error::unauthorized(INVALID_TOKEN)
            }
        }
    })
}

/// An authenticated customer.
#[derive(Debug, Clone)]
pub struct CallerUser(pub UserPrincipal);

impl FromRequest for CallerUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).and_then(|identity| {
            identity.require_user().cloned().map(Self)
        }))
    }
}

/// An authenticated administrator.
#[derive(Debug, Clone)]
pub struct CallerAdmin(pub AdminPrincipal);

impl FromRequest for CallerAdmin {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).and_then(|identity| {
            identity.require_admin().cloned().map(Self)
        }))
    }
}
