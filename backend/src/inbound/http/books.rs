//! Public catalogue HTTP handlers.
//!
//! ```text
//! GET /books
//! GET /books/search?query=dune
//! GET /api/books
//! GET /api/books/search?query=dune
//! GET /api/books/featured
//! GET /api/books/category/{category}
//! GET /api/books/{id}
//! POST /api/books/{id}/view
//! ```
//!
//! `list_books` is mounted both at the root and under `/api`. The search
//! routes must be registered before `/books/{id}` so the literal segments win.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Book, Error, SearchMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::book_id_or_not_found;

const NO_MATCHES: &str = "No books found for the given query.";

/// `?query=` parameter shared by the search endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring to look for.
    pub query: Option<String>,
}

impl SearchParams {
    fn as_str(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// List every book, newest first.
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books", body = [BookSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security([])
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Book>>> {
    Ok(web::Json(state.catalogue.list_all().await?))
}

/// Title/author search kept for older clients; an empty result is a `404`.
#[utoipa::path(
    get,
    path = "/books/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching books", body = [BookSchema]),
        (status = 400, description = "Blank query", body = ErrorSchema),
        (status = 404, description = "No matches", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "legacySearchBooks",
    security([])
)]
#[get("/books/search")]
pub async fn legacy_search_books(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let books = state
        .catalogue
        .search(params.as_str(), SearchMode::Strict)
        .await?;
    if books.is_empty() {
        return Err(Error::not_found(NO_MATCHES));
    }
    Ok(web::Json(books))
}

/// Search titles, authors and descriptions. A blank query lists everything.
#[utoipa::path(
    get,
    path = "/api/books/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching books", body = [BookSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "searchBooks",
    security([])
)]
#[get("/books/search")]
pub async fn search_books(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let books = state
        .catalogue
        .search(params.as_str(), SearchMode::Public)
        .await?;
    Ok(web::Json(books))
}

#[utoipa::path(
    get,
    path = "/api/books/featured",
    responses(
        (status = 200, description = "Featured books", body = [BookSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listFeaturedBooks",
    security([])
)]
#[get("/books/featured")]
pub async fn featured_books(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Book>>> {
    Ok(web::Json(state.catalogue.list_featured().await?))
}

#[utoipa::path(
    get,
    path = "/api/books/category/{category}",
    params(("category" = String, Path, description = "Exact category name")),
    responses(
        (status = 200, description = "Books in the category", body = [BookSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooksByCategory",
    security([])
)]
#[get("/books/category/{category}")]
pub async fn books_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let books = state.catalogue.list_by_category(&path.into_inner()).await?;
    Ok(web::Json(books))
}

/// Fetch a single book. Malformed ids are reported as missing.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book UUID")),
    responses(
        (status = 200, description = "Book", body = BookSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook",
    security([])
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Book>> {
    let id = book_id_or_not_found(&path)?;
    Ok(web::Json(state.catalogue.get(&id).await?))
}

/// Count a page view. Unknown or malformed ids are accepted and ignored.
#[utoipa::path(
    post,
    path = "/api/books/{id}/view",
    params(("id" = String, Path, description = "Book UUID")),
    responses(
        (status = 200, description = "View recorded"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "recordBookView",
    security([])
)]
#[post("/books/{id}/view")]
pub async fn record_view(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Ok(id) = book_id_or_not_found(&path) {
        state.catalogue.record_view(&id).await?;
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "View recorded" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;
    use crate::inbound::http::test_utils::{TestPorts, sample_book};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn call(ports: TestPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(list_books)
                .service(legacy_search_books)
                .service(
                    web::scope("/api")
                        .service(list_books)
                        .service(search_books)
                        .service(featured_books)
                        .service(books_by_category)
                        .service(get_book)
                        .service(record_view),
                ),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[rstest]
    #[case("/books")]
    #[case("/api/books")]
    #[actix_web::test]
    async fn list_is_served_on_both_prefixes(#[case] uri: &str) {
        let mut ports = TestPorts::default();
        let book = sample_book();
        ports
            .catalogue
            .expect_list_all()
            .times(1)
            .return_once(move || Ok(vec![book]));

        let (status, body) = call(ports, actix_test::TestRequest::get().uri(uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Dune");
        assert_eq!(body[0]["bookType"], "internal");
    }

    #[actix_web::test]
    async fn legacy_search_reports_empty_results_as_not_found() {
        let mut ports = TestPorts::default();
        ports
            .catalogue
            .expect_search()
            .withf(|query, mode| query == "zzz" && *mode == SearchMode::Strict)
            .return_once(|_, _| Ok(Vec::new()));

        let (status, body) = call(
            ports,
            actix_test::TestRequest::get().uri("/books/search?query=zzz"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], NO_MATCHES);
    }

    #[actix_web::test]
    async fn public_search_returns_empty_array() {
        let mut ports = TestPorts::default();
        ports
            .catalogue
            .expect_search()
            .withf(|query, mode| query.is_empty() && *mode == SearchMode::Public)
            .return_once(|_, _| Ok(Vec::new()));

        let (status, body) =
            call(ports, actix_test::TestRequest::get().uri("/api/books/search")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(Vec::new()));
    }

    #[actix_web::test]
    async fn featured_is_not_routed_as_an_id() {
        let mut ports = TestPorts::default();
        ports
            .catalogue
            .expect_list_featured()
            .return_once(|| Ok(Vec::new()));

        let (status, _) =
            call(ports, actix_test::TestRequest::get().uri("/api/books/featured")).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_id_is_not_found_without_a_lookup() {
        let (status, body) = call(
            TestPorts::default(),
            actix_test::TestRequest::get().uri("/api/books/not-a-uuid"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Book not found");
    }

    #[actix_web::test]
    async fn view_on_malformed_id_is_accepted() {
        let (status, _) = call(
            TestPorts::default(),
            actix_test::TestRequest::post().uri("/api/books/nope/view"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn view_counts_known_ids() {
        let id = BookId::random();
        let mut ports = TestPorts::default();
        ports
            .catalogue
            .expect_record_view()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .return_once(|_| Ok(()));

        let (status, _) = call(
            ports,
            actix_test::TestRequest::post().uri(&format!("/api/books/{id}/view")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }
}
