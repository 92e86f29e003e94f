//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed bookstore entities and the use-cases that
//! operate on them. Nothing in this module depends on HTTP, Diesel or any
//! third-party SDK; those live behind the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Book, BookDraft, BookPage: catalogue entities.
//! - Order, OrderDraft, PlacedOrder: checkout entities.
//! - Identity: tagged caller identity decoded from bearer tokens.
//! - BookCatalogueService, OrderService, AccountService: driving-port
//!   implementations.

pub mod account_service;
pub mod audit;
pub mod auth;
pub mod book;
pub mod book_catalogue_service;
pub mod error;
pub mod identity;
pub mod order;
pub mod order_service;
pub mod ports;
pub mod trace_id;
pub mod upload;

pub use self::account_service::{AccountService, AccountServicePorts};
pub use self::audit::{AuditAction, AuditEntry, NewAuditEntry};
pub use self::auth::{
    Admin, AdminAccount, LoginCredentials, LoginValidationError, NewUser, RegistrationDraft,
    RegistrationField, RegistrationInput, RegistrationValidationError, User, UserAccount,
};
pub use self::book::{
    Book, BookDraft, BookId, BookPage, BookSearch, BookType, BookValidationError, NewBook,
    PageRequest, SearchMode,
};
pub use self::book_catalogue_service::BookCatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{AdminId, AdminPrincipal, Identity, UserId, UserPrincipal};
pub use self::order::{
    CartItem, NewOrder, ORDER_CURRENCY, Order, OrderDraft, OrderId, OrderItem, OrderStatus,
    OrderValidationError, PaymentOrder, PaymentOrderRequest, PlacedOrder,
};
pub use self::order_service::OrderService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{
    ImageUpload, MAX_IMAGE_BYTES, UPLOAD_URL_PREFIX, UploadValidationError, image_url,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bookstore::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
