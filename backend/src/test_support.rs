//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.
//!
//! [`TestBackend`] wires the real domain services and token service over
//! in-memory repositories so HTTP scenarios exercise everything except
//! PostgreSQL and the third-party APIs.

pub mod doubles;
pub mod memory;

use std::sync::Arc;

use crate::domain::ports::{PaymentGateway, PaymentGatewayError, TokenError, TokenService};
use crate::domain::{
    AccountService, AccountServicePorts, Admin, AdminId, BookCatalogueService, OrderService,
    User, UserId,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::token::JwtTokenService;

use doubles::{
    InMemoryImageStore, MutableClock, PlainPasswordHasher, RecordingPaymentGateway,
    StubHumanVerifier,
};
use memory::{InMemoryAdmins, InMemoryBookRepository, InMemoryOrderRepository, InMemoryUserAccounts};

/// Signing secret used by [`TestBackend`] tokens.
pub const TEST_JWT_SECRET: &[u8] = b"test-secret";

/// Options for [`TestBackend::build`].
#[derive(Debug, Clone)]
pub struct TestBackendOptions {
    pub payments_enabled: bool,
    pub captcha_accepts: bool,
    /// Error returned by every payment call when payments are enabled.
    pub payment_failure: Option<PaymentGatewayError>,
    /// Seeded administrator as `(username, password)`.
    pub admin: (String, String),
}

impl Default for TestBackendOptions {
    fn default() -> Self {
        Self {
            payments_enabled: true,
            captcha_accepts: true,
            payment_failure: None,
            admin: ("admin".to_owned(), "admin-password".to_owned()),
        }
    }
}

/// Fully wired in-memory backend.
pub struct TestBackend {
    pub clock: Arc<MutableClock>,
    pub books: Arc<InMemoryBookRepository>,
    pub users: Arc<InMemoryUserAccounts>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub payments: Option<Arc<RecordingPaymentGateway>>,
    pub images: Arc<InMemoryImageStore>,
    pub tokens: Arc<JwtTokenService>,
    admin_username: String,
    state: HttpState,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::build(TestBackendOptions::default())
    }

    pub fn build(options: TestBackendOptions) -> Self {
        let clock = Arc::new(MutableClock::fixed());
        let books = Arc::new(InMemoryBookRepository::new(clock.clone()));
        let users = Arc::new(InMemoryUserAccounts::default());
        let orders = Arc::new(InMemoryOrderRepository::new(clock.clone()));
        let images = Arc::new(InMemoryImageStore::default());
        let tokens = Arc::new(JwtTokenService::new(TEST_JWT_SECRET, clock.clone()));
        let payments = options.payments_enabled.then(|| {
            Arc::new(match options.payment_failure {
                Some(error) => RecordingPaymentGateway::failing(error),
                None => RecordingPaymentGateway::default(),
            })
        });

        let (admin_name, admin_password) = options.admin;
        let admins = InMemoryAdmins::default()
            .with_admin(&admin_name, format!("plain${admin_password}"));

        let accounts = AccountService::new(AccountServicePorts {
            users: users.clone(),
            admins: Arc::new(admins),
            hasher: Arc::new(PlainPasswordHasher),
            tokens: tokens.clone(),
            verifier: Arc::new(StubHumanVerifier {
                accept: options.captcha_accepts,
            }),
        });
        let gateway = payments
            .clone()
            .map(|gateway| gateway as Arc<dyn PaymentGateway>);

        let state = HttpState {
            catalogue: Arc::new(BookCatalogueService::new(books.clone())),
            orders: Arc::new(OrderService::new(orders.clone(), gateway, clock.clone())),
            accounts: Arc::new(accounts),
            tokens: tokens.clone(),
            images: images.clone(),
        };

        Self {
            clock,
            books,
            users,
            orders,
            payments,
            images,
            tokens,
            admin_username: admin_name,
            state,
        }
    }

    /// Handler state to register with `App::app_data`.
    pub fn state(&self) -> HttpState {
        self.state.clone()
    }

    /// Token for the seeded administrator (id 1).
    pub fn admin_token(&self) -> Result<String, TokenError> {
        self.tokens.issue_for_admin(&Admin {
            id: AdminId::new(1),
            username: self.admin_username.clone(),
        })
    }

    /// Token for an arbitrary customer id, whether or not it is registered.
    pub fn user_token(&self, id: i64, email: &str) -> Result<String, TokenError> {
        self.tokens.issue_for_user(&User {
            id: UserId::new(id),
            name: "Test Reader".to_owned(),
            email: email.to_owned(),
            mobile: String::new(),
            state: String::new(),
            city: String::new(),
        })
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
