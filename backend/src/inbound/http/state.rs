//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, BookCatalogue, ImageStore, OrderCommand, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn BookCatalogue>,
    pub orders: Arc<dyn OrderCommand>,
    pub accounts: Arc<dyn AccountCommand>,
    /// Used by the bearer-token extractors.
    pub tokens: Arc<dyn TokenService>,
    pub images: Arc<dyn ImageStore>,
}
