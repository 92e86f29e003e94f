//! Shared helpers for HTTP scenario tests.
//!
//! Each integration test file compiles as its own crate, so not every helper
//! is used everywhere.
#![allow(dead_code, reason = "helpers are shared across test crates")]

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::{App, test as actix_test, web};
use bookstore::Trace;
use bookstore::domain::TRACE_ID_HEADER;
use bookstore::inbound::http::configure;
use bookstore::inbound::http::health::HealthState;
use bookstore::test_support::TestBackend;
use serde_json::{Value, json};

/// Status, decoded body and trace header of one response.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub trace_id: Option<String>,
}

/// Run `request` through the full route table over `backend`'s state.
///
/// Non-JSON bodies are returned as a JSON string; empty bodies as null.
pub async fn send(backend: &TestBackend, request: actix_test::TestRequest) -> Reply {
    let health = HealthState::new();
    health.mark_ready();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(backend.state()))
            .app_data(web::Data::new(health))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Reply {
        status,
        body,
        trace_id,
    }
}

pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

pub fn admin_bearer(backend: &TestBackend) -> (HeaderName, String) {
    bearer(&backend.admin_token().expect("admin token"))
}

pub fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "description": "Spice and sandworms",
        "category": "Sci-Fi",
        "price": 499.0,
        "stock": 4,
        "featured": true,
    })
}

/// Create a book through the admin API and return its JSON.
pub async fn create_book(backend: &TestBackend, payload: Value) -> Value {
    let reply = send(
        backend,
        actix_test::TestRequest::post()
            .uri("/api/admin/books")
            .insert_header(admin_bearer(backend))
            .set_json(payload),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "create failed: {}", reply.body);
    reply.body
}
