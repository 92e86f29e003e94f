//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are used only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An optional integration is not configured.
    #[schema(rename = "feature_disabled")]
    FeatureDisabled,
    /// A store or third-party call failed.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "Book not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Book, rename_all = "camelCase")]
pub struct BookSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Dune")]
    title: String,
    #[schema(example = "Frank Herbert")]
    author: String,
    description: String,
    category: Option<String>,
    #[schema(example = 499.0)]
    price: f64,
    stock: i32,
    #[schema(example = "/uploads/1700000000000-123456789.jpg")]
    image_url: Option<String>,
    featured: bool,
    publisher_url: Option<String>,
    #[schema(example = "internal")]
    book_type: String,
    view_count: i64,
    created_by: Option<i64>,
    updated_by: Option<i64>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::BookPage`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BookPage, rename_all = "camelCase")]
pub struct BookPageSchema {
    books: Vec<BookSchema>,
    total: i64,
    page: u32,
    limit: u32,
    total_pages: i64,
}

/// OpenAPI schema for [`crate::domain::AuditEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuditEntry, rename_all = "camelCase")]
pub struct AuditEntrySchema {
    id: i64,
    #[schema(value_type = String, format = Uuid)]
    book_id: String,
    #[schema(example = "UPDATE")]
    action_type: String,
    admin_id: i64,
    old_values: Option<serde_json::Value>,
    new_values: serde_json::Value,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    id: i64,
    name: String,
    email: String,
    mobile: String,
    state: String,
    city: String,
}

/// OpenAPI schema for [`crate::domain::Admin`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Admin)]
pub struct AdminSchema {
    id: i64,
    username: String,
}

/// OpenAPI schema for [`crate::domain::ports::UserSession`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UserSession)]
pub struct UserSessionSchema {
    /// Bearer token valid for 24 hours.
    token: String,
    user: UserSchema,
}

/// OpenAPI schema for [`crate::domain::ports::AdminSession`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::AdminSession)]
pub struct AdminSessionSchema {
    /// Bearer token valid for 24 hours.
    token: String,
    admin: AdminSchema,
}

/// OpenAPI schema for [`crate::domain::CartItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CartItem, rename_all = "camelCase")]
pub struct CartItemSchema {
    #[schema(value_type = String, format = Uuid)]
    book_id: String,
    #[schema(example = 1)]
    quantity: i32,
    #[schema(example = 499.0)]
    price: f64,
}

/// OpenAPI schema for [`crate::domain::OrderItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OrderItem, rename_all = "camelCase")]
pub struct OrderItemSchema {
    #[schema(value_type = String, format = Uuid)]
    book_id: String,
    quantity: i32,
    price: f64,
}

/// OpenAPI schema for [`crate::domain::Order`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Order, rename_all = "camelCase")]
pub struct OrderSchema {
    id: i64,
    user_id: i64,
    total_amount: f64,
    razorpay_order_id: String,
    #[schema(example = "pending")]
    status: String,
    razorpay_payment_id: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    items: Vec<OrderItemSchema>,
}

/// OpenAPI schema for [`crate::domain::PlacedOrder`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PlacedOrder, rename_all = "camelCase")]
pub struct PlacedOrderSchema {
    order_id: i64,
    #[schema(example = "order_NXp3sX8yYQqZ1a")]
    razorpay_order_id: String,
    /// Amount in minor units (paise).
    #[schema(example = 49900)]
    amount: i64,
}
