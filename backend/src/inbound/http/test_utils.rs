//! Test helpers for inbound HTTP components.
//!
//! Handler tests run against mocked driving ports and a token service that
//! recognises two fixed bearer tokens.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockAccountCommand, MockBookCatalogue, MockImageStore, MockOrderCommand, TokenError,
    TokenService,
};
use crate::domain::{
    Admin, AdminId, AdminPrincipal, Book, BookId, BookType, Identity, User, UserId,
    UserPrincipal,
};
use crate::inbound::http::state::HttpState;

pub const USER_TOKEN: &str = "user-token";
pub const ADMIN_TOKEN: &str = "admin-token";

/// Token service accepting [`USER_TOKEN`] and [`ADMIN_TOKEN`] only.
pub struct StaticTokenService;

impl TokenService for StaticTokenService {
    fn issue_for_user(&self, _user: &User) -> Result<String, TokenError> {
        Ok(USER_TOKEN.to_owned())
    }

    fn issue_for_admin(&self, _admin: &Admin) -> Result<String, TokenError> {
        Ok(ADMIN_TOKEN.to_owned())
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        match token {
            USER_TOKEN => Ok(Identity::User(UserPrincipal {
                id: UserId::new(1),
                email: "reader@example.com".into(),
            })),
            ADMIN_TOKEN => Ok(Identity::Admin(AdminPrincipal {
                id: AdminId::new(1),
                username: "root".into(),
            })),
            _ => Err(TokenError::invalid("unknown test token")),
        }
    }
}

/// Mocked driving ports; set expectations, then call [`Self::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub catalogue: MockBookCatalogue,
    pub orders: MockOrderCommand,
    pub accounts: MockAccountCommand,
    pub images: MockImageStore,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            catalogue: Arc::new(self.catalogue),
            orders: Arc::new(self.orders),
            accounts: Arc::new(self.accounts),
            tokens: Arc::new(StaticTokenService),
            images: Arc::new(self.images),
        }
    }
}

/// State whose ports panic on any unexpected call.
pub fn test_state() -> HttpState {
    TestPorts::default().into_state()
}

/// `Authorization` header pair for a bearer token.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// A fully populated book with fixed timestamps.
pub fn sample_book() -> Book {
    let at = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Book {
        id: BookId::random(),
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        description: "Desert planet".into(),
        category: Some("Sci-Fi".into()),
        price: 499.0,
        stock: 3,
        image_url: None,
        featured: true,
        publisher_url: None,
        book_type: BookType::Internal,
        view_count: 0,
        created_by: None,
        updated_by: None,
        created_at: at,
        updated_at: at,
    }
}
