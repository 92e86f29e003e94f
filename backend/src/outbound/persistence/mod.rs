//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository owns a clone of the shared [`DbPool`] and implements one
//! driven port from [`crate::domain::ports`]:
//!
//! - [`DieselBookRepository`]: catalogue reads, admin mutations and the
//!   append-only audit log. Create and update write the book row and the
//!   audit entry in one transaction.
//! - [`DieselUserAccountRepository`] / [`DieselAdminRepository`]: account
//!   lookup and registration. Unique violations surface as `Duplicate`.
//! - [`DieselOrderRepository`]: orders and their lines, inserted together.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; conversions into domain types happen here.
//!
//! # Example
//!
//! ```ignore
//! use bookstore::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookstore")).await?;
//! let books = DieselBookRepository::new(pool.clone());
//! ```

mod diesel_account_repository;
mod diesel_book_repository;
pub(crate) mod diesel_helpers;
mod diesel_order_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::{DieselAdminRepository, DieselUserAccountRepository};
pub use diesel_book_repository::DieselBookRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
