//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`BookCatalogue`, `OrderCommand`, `AccountCommand`) are
//! implemented by domain services and called by inbound adapters. Driven
//! ports are implemented by outbound adapters and called by the services.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_repository;
mod book_catalogue;
mod book_repository;
mod human_verifier;
mod image_store;
mod order_command;
mod order_repository;
mod password_hasher;
mod payment_gateway;
mod token_service;

pub use account_command::{AccountCommand, AdminSession, UserSession};
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_repository::{AccountRepositoryError, AdminRepository, UserAccountRepository};
#[cfg(test)]
pub use account_repository::{MockAdminRepository, MockUserAccountRepository};
pub use book_catalogue::BookCatalogue;
#[cfg(test)]
pub use book_catalogue::MockBookCatalogue;
pub use book_repository::{BookRepository, BookRepositoryError};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use human_verifier::{HumanVerifier, RejectingHumanVerifier};
#[cfg(test)]
pub use human_verifier::MockHumanVerifier;
pub use image_store::{ImageStore, ImageStoreError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use order_command::OrderCommand;
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use payment_gateway::{PaymentGateway, PaymentGatewayError};
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use token_service::MockTokenService;
