//! Administrative catalogue handlers.
//!
//! ```text
//! GET /api/admin/books?page=1&limit=10
//! GET /api/admin/books/search?query=dune
//! GET /api/admin/books/{id}
//! GET /api/admin/books/{id}/audit
//! POST /api/admin/books {"title":"Dune","author":"Frank Herbert","price":499}
//! PUT /api/admin/books/{id}
//! DELETE /api/admin/books/{id}
//! ```
//!
//! Every handler requires an administrator bearer token via [`CallerAdmin`].

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AuditEntry, Book, BookDraft, BookPage, BookType, PageRequest, SearchMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerAdmin;
use crate::inbound::http::books::SearchParams;
use crate::inbound::http::schemas::{AuditEntrySchema, BookPageSchema, BookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, book_id_or_not_found, invalid_value_error, missing_field_error, non_blank,
};

/// Create/update payload. Missing optional fields take their defaults.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub publisher_url: Option<String>,
    /// `internal` (default) or `external`.
    pub book_type: Option<String>,
}

impl TryFrom<BookRequest> for BookDraft {
    type Error = crate::domain::Error;

    fn try_from(value: BookRequest) -> Result<Self, Self::Error> {
        let title = value
            .title
            .ok_or_else(|| missing_field_error(FieldName::new("title")))?;
        let author = value
            .author
            .ok_or_else(|| missing_field_error(FieldName::new("author")))?;
        let price = value
            .price
            .ok_or_else(|| missing_field_error(FieldName::new("price")))?;
        let book_type = match non_blank(value.book_type) {
            Some(raw) => BookType::from_str(&raw)
                .map_err(|err| invalid_value_error("bookType", err.to_string()))?,
            None => BookType::default(),
        };

        Ok(Self {
            title,
            author,
            description: value.description.unwrap_or_default(),
            category: non_blank(value.category),
            price,
            stock: value.stock.unwrap_or(0),
            image_url: non_blank(value.image_url),
            featured: value.featured.unwrap_or(false),
            publisher_url: non_blank(value.publisher_url),
            book_type,
        })
    }
}

/// Raw paging parameters; unparsable values fall back to defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10, capped at 100).
    pub limit: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/books",
    params(PageParams),
    responses(
        (status = 200, description = "Page of books", body = BookPageSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListBooks"
)]
#[get("/books")]
pub async fn admin_list_books(
    state: web::Data<HttpState>,
    _admin: CallerAdmin,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<BookPage>> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    Ok(web::Json(state.catalogue.list_admin(page).await?))
}

/// Title/author search; a blank query is rejected.
#[utoipa::path(
    get,
    path = "/api/admin/books/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching books", body = [BookSchema]),
        (status = 400, description = "Blank query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSearchBooks"
)]
#[get("/books/search")]
pub async fn admin_search_books(
    state: web::Data<HttpState>,
    _admin: CallerAdmin,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let query = params.query.as_deref().unwrap_or_default();
    let books = state.catalogue.search(query, SearchMode::Strict).await?;
    Ok(web::Json(books))
}

#[utoipa::path(
    get,
    path = "/api/admin/books/{id}",
    params(("id" = String, Path, description = "Book UUID")),
    responses(
        (status = 200, description = "Book", body = BookSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminGetBook"
)]
#[get("/books/{id}")]
pub async fn admin_get_book(
    state: web::Data<HttpState>,
    _admin: CallerAdmin,
    path: web::Path<String>,
) -> ApiResult<web::Json<Book>> {
    let id = book_id_or_not_found(&path)?;
    Ok(web::Json(state.catalogue.get(&id).await?))
}

/// Create and update history for a book, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/books/{id}/audit",
    params(("id" = String, Path, description = "Book UUID")),
    responses(
        (status = 200, description = "Audit entries", body = [AuditEntrySchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminBookAudit"
)]
#[get("/books/{id}/audit")]
pub async fn book_audit_trail(
    state: web::Data<HttpState>,
    _admin: CallerAdmin,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AuditEntry>>> {
    let id = book_id_or_not_found(&path)?;
    Ok(web::Json(state.catalogue.audit_trail(&id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Created book", body = BookSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    CallerAdmin(admin): CallerAdmin,
    payload: web::Json<BookRequest>,
) -> ApiResult<HttpResponse> {
    let draft = BookDraft::try_from(payload.into_inner())?;
    let book = state.catalogue.create(draft, &admin).await?;
    Ok(HttpResponse::Created().json(book))
}

/// Overwrite every field of a book.
#[utoipa::path(
    put,
    path = "/api/admin/books/{id}",
    params(("id" = String, Path, description = "Book UUID")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Updated book", body = BookSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    CallerAdmin(admin): CallerAdmin,
    path: web::Path<String>,
    payload: web::Json<BookRequest>,
) -> ApiResult<web::Json<Book>> {
    let id = book_id_or_not_found(&path)?;
    let draft = BookDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.catalogue.update(&id, draft, &admin).await?))
}

/// Delete a book. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/admin/books/{id}",
    params(("id" = String, Path, description = "Book UUID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    _admin: CallerAdmin,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Ok(id) = book_id_or_not_found(&path) {
        state.catalogue.remove(&id).await?;
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Book deleted successfully" })))
}
