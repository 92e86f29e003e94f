//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: bearer token authentication scheme
//!
//! The generated document is served by Swagger UI in debug builds.

use crate::inbound::http::schemas::{
    AdminSchema, AdminSessionSchema, AuditEntrySchema, BookPageSchema, BookSchema,
    CartItemSchema, ErrorCodeSchema, ErrorSchema, OrderItemSchema, OrderSchema,
    PlacedOrderSchema, UserSchema, UserSessionSchema,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_owned());
        scheme.description =
            Some("Token issued by POST /api/auth/login or POST /api/admin/login.".to_owned());
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookstore backend API",
        description = "Catalogue, checkout and administration endpoints for the bookstore."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::legacy_search_books,
        crate::inbound::http::books::search_books,
        crate::inbound::http::books::featured_books,
        crate::inbound::http::books::books_by_category,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::record_view,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_user,
        crate::inbound::http::accounts::login_admin,
        crate::inbound::http::admin_books::admin_list_books,
        crate::inbound::http::admin_books::admin_search_books,
        crate::inbound::http::admin_books::admin_get_book,
        crate::inbound::http::admin_books::book_audit_trail,
        crate::inbound::http::admin_books::create_book,
        crate::inbound::http::admin_books::update_book,
        crate::inbound::http::admin_books::delete_book,
        crate::inbound::http::uploads::upload_image,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::complete_order,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BookSchema,
        BookPageSchema,
        AuditEntrySchema,
        UserSchema,
        AdminSchema,
        UserSessionSchema,
        AdminSessionSchema,
        CartItemSchema,
        OrderItemSchema,
        OrderSchema,
        PlacedOrderSchema,
    )),
    tags(
        (name = "books", description = "Public catalogue"),
        (name = "auth", description = "Registration and login"),
        (name = "admin", description = "Catalogue administration"),
        (name = "orders", description = "Checkout and order history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
