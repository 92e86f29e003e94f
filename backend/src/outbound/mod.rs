//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **payment**: Razorpay order creation over HTTPS
//! - **captcha**: reCAPTCHA token verification
//! - **token**: HS256 bearer tokens
//! - **password**: Argon2id hashing
//! - **image_store**: capability-scoped upload directory
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod captcha;
pub mod image_store;
pub mod password;
pub mod payment;
pub mod persistence;
pub mod token;
