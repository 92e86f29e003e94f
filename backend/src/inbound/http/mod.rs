//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers every route, so the server bootstrap and the
//! integration tests mount an identical surface.

pub mod accounts;
pub mod admin_books;
pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod orders;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod validation;

pub use error::ApiResult;

use actix_web::{ResponseError, error::InternalError, web};

use self::validation::malformed_body_error;

fn malformed_request(err: impl Into<actix_web::Error>, message: String) -> actix_web::Error {
    let response = malformed_body_error(message).error_response();
    InternalError::from_response(err.into(), response).into()
}

/// Report unparsable JSON bodies with the standard error payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        malformed_request(err, message)
    })
}

/// Report unparsable query strings with the standard error payload.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        malformed_request(err, message)
    })
}

/// Register the health probes, the public catalogue and the `/api` scope.
///
/// Literal segments (`search`, `featured`, `upload-image`) are registered
/// before their `{id}` siblings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health::index)
        .service(health::ready)
        .service(health::live)
        .service(books::list_books)
        .service(books::legacy_search_books)
        .service(
            web::scope("/api")
                .service(books::list_books)
                .service(books::search_books)
                .service(books::featured_books)
                .service(books::books_by_category)
                .service(books::get_book)
                .service(books::record_view)
                .service(accounts::register)
                .service(accounts::login_user)
                .service(orders::place_order)
                .service(orders::list_orders)
                .service(orders::complete_order)
                .service(
                    web::scope("/admin")
                        .service(accounts::login_admin)
                        .service(admin_books::admin_list_books)
                        .service(admin_books::admin_search_books)
                        .service(uploads::upload_image)
                        .service(admin_books::create_book)
                        .service(admin_books::book_audit_trail)
                        .service(admin_books::admin_get_book)
                        .service(admin_books::update_book)
                        .service(admin_books::delete_book),
                ),
        );
}
