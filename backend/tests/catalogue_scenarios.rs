//! End-to-end catalogue scenarios over the in-memory backend.
//!
//! Covers the public listing routes and the administrator CRUD flow,
//! including the audit trail written alongside each mutation.

mod support;

use std::collections::HashSet;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use bookstore::test_support::TestBackend;
use rstest::{fixture, rstest};
use serde_json::json;

use support::{admin_bearer, create_book, dune, send};

#[fixture]
fn backend() -> TestBackend {
    TestBackend::new()
}

#[rstest]
#[actix_web::test]
async fn created_books_get_distinct_ids_and_a_create_audit_entry(backend: TestBackend) {
    let mut ids = HashSet::new();
    for title in ["Dune", "Dune Messiah", "Children of Dune"] {
        let mut payload = dune();
        payload["title"] = json!(title);
        let book = create_book(&backend, payload).await;
        let id = book["id"].as_str().expect("uuid id").to_owned();
        assert!(ids.insert(id), "duplicate id for {title}");
    }
    assert_eq!(backend.books.book_count(), 3);

    let first = ids.iter().next().expect("one id");
    let reply = send(
        &backend,
        actix_test::TestRequest::get()
            .uri(&format!("/api/admin/books/{first}/audit"))
            .insert_header(admin_bearer(&backend)),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let entries = reply.body.as_array().expect("audit array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["actionType"], "CREATE");
    assert_eq!(entries[0]["adminId"], 1);
    assert!(entries[0]["oldValues"].is_null());
    assert_eq!(entries[0]["newValues"]["author"], "Frank Herbert");
}

#[rstest]
#[actix_web::test]
async fn update_audit_holds_prior_row_and_submitted_payload(backend: TestBackend) {
    let created = create_book(&backend, dune()).await;
    let id = created["id"].as_str().expect("uuid id").to_owned();

    let update = json!({
        "title": "Dune Messiah",
        "author": "Frank Herbert",
        "description": "Sequel",
        "category": "Sci-Fi",
        "price": 599.0,
        "stock": 2,
    });
    let reply = send(
        &backend,
        actix_test::TestRequest::put()
            .uri(&format!("/api/admin/books/{id}"))
            .insert_header(admin_bearer(&backend))
            .set_json(update),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "Dune Messiah");
    assert_eq!(reply.body["featured"], false);

    let audit = backend.books.audit_log();
    assert_eq!(audit.len(), 2);
    let entry = &audit[1];
    assert_eq!(entry.action_type.as_str(), "UPDATE");
    assert_eq!(entry.old_values.as_ref(), Some(&created));
    assert_eq!(
        entry.new_values,
        json!({
            "title": "Dune Messiah",
            "author": "Frank Herbert",
            "description": "Sequel",
            "category": "Sci-Fi",
            "price": 599.0,
            "stock": 2,
            "imageUrl": null,
            "featured": false,
            "publisherUrl": null,
            "bookType": "internal",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn updating_an_unknown_book_is_not_found(backend: TestBackend) {
    let reply = send(
        &backend,
        actix_test::TestRequest::put()
            .uri("/api/admin/books/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .insert_header(admin_bearer(&backend))
            .set_json(dune()),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(backend.books.audit_log().is_empty());
}

#[rstest]
#[case("/api/books/search?query=zzz", StatusCode::OK)]
#[case("/books/search?query=zzz", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn search_without_matches_is_never_a_server_error(
    backend: TestBackend,
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    create_book(&backend, dune()).await;

    let reply = send(&backend, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(reply.status, expected);
    if expected == StatusCode::OK {
        assert_eq!(reply.body, json!([]));
    } else {
        assert_eq!(reply.body["message"], "No books found for the given query.");
    }
}

#[rstest]
#[actix_web::test]
async fn search_matches_title_and_author_case_insensitively(backend: TestBackend) {
    create_book(&backend, dune()).await;
    let mut other = dune();
    other["title"] = json!("Neuromancer");
    other["author"] = json!("William Gibson");
    create_book(&backend, other).await;

    let by_author = send(
        &backend,
        actix_test::TestRequest::get().uri("/api/books/search?query=gibson"),
    )
    .await;
    let blank = send(
        &backend,
        actix_test::TestRequest::get().uri("/api/books/search?query=%20"),
    )
    .await;

    assert_eq!(by_author.status, StatusCode::OK);
    assert_eq!(by_author.body.as_array().map(Vec::len), Some(1));
    assert_eq!(by_author.body[0]["title"], "Neuromancer");
    assert_eq!(blank.body.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn deleting_a_missing_book_succeeds(backend: TestBackend) {
    let reply = send(
        &backend,
        actix_test::TestRequest::delete()
            .uri("/api/admin/books/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .insert_header(admin_bearer(&backend)),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Book deleted successfully");
}

#[rstest]
#[actix_web::test]
async fn deleted_books_disappear_from_listings(backend: TestBackend) {
    let created = create_book(&backend, dune()).await;
    let id = created["id"].as_str().expect("uuid id").to_owned();

    let deleted = send(
        &backend,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/admin/books/{id}"))
            .insert_header(admin_bearer(&backend)),
    )
    .await;
    let listing = send(&backend, actix_test::TestRequest::get().uri("/books")).await;

    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(listing.body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_book_is_not_found(backend: TestBackend) {
    let reply = send(
        &backend,
        actix_test::TestRequest::get().uri("/api/books/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["message"], "Book not found");
    assert_eq!(reply.body["code"], "not_found");
    assert!(reply.trace_id.is_some());
}

#[rstest]
#[actix_web::test]
async fn views_are_counted(backend: TestBackend) {
    let created = create_book(&backend, dune()).await;
    let id = created["id"].as_str().expect("uuid id").to_owned();

    for _ in 0..2 {
        let reply = send(
            &backend,
            actix_test::TestRequest::post().uri(&format!("/api/books/{id}/view")),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
    }
    let reply = send(
        &backend,
        actix_test::TestRequest::get().uri(&format!("/api/books/{id}")),
    )
    .await;

    assert_eq!(reply.body["viewCount"], 2);
}

#[rstest]
#[actix_web::test]
async fn featured_and_category_listings_filter_books(backend: TestBackend) {
    create_book(&backend, dune()).await;
    let mut plain = dune();
    plain["title"] = json!("Emma");
    plain["author"] = json!("Jane Austen");
    plain["category"] = json!("Classics");
    plain["featured"] = json!(false);
    create_book(&backend, plain).await;

    let featured = send(
        &backend,
        actix_test::TestRequest::get().uri("/api/books/featured"),
    )
    .await;
    let classics = send(
        &backend,
        actix_test::TestRequest::get().uri("/api/books/category/Classics"),
    )
    .await;

    assert_eq!(featured.body.as_array().map(Vec::len), Some(1));
    assert_eq!(featured.body[0]["title"], "Dune");
    assert_eq!(classics.body.as_array().map(Vec::len), Some(1));
    assert_eq!(classics.body[0]["title"], "Emma");
}

#[rstest]
#[actix_web::test]
async fn admin_listing_pages_newest_first(backend: TestBackend) {
    for title in ["First", "Second", "Third"] {
        let mut payload = dune();
        payload["title"] = json!(title);
        create_book(&backend, payload).await;
    }

    let reply = send(
        &backend,
        actix_test::TestRequest::get()
            .uri("/api/admin/books?page=2&limit=2")
            .insert_header(admin_bearer(&backend)),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total"], 3);
    assert_eq!(reply.body["totalPages"], 2);
    assert_eq!(reply.body["page"], 2);
    assert_eq!(reply.body["books"][0]["title"], "First");
}
