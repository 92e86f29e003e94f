//! Registration and login flows over the in-memory backend.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use bookstore::domain::Identity;
use bookstore::domain::ports::TokenService;
use bookstore::test_support::{TestBackend, TestBackendOptions};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use support::{Reply, send};

#[fixture]
fn registration() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "password": "analytical-engine",
        "mobile": "9876543210",
        "state": "Karnataka",
        "city": "Bengaluru",
        "captchaToken": "passed-challenge",
    })
}

async fn post(backend: &TestBackend, uri: &str, body: Value) -> Reply {
    send(
        backend,
        actix_test::TestRequest::post().uri(uri).set_json(body),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn registering_twice_is_rejected(registration: Value) {
    let backend = TestBackend::new();

    let first = post(&backend, "/api/auth/register", registration.clone()).await;
    let second = post(&backend, "/api/auth/register", registration).await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert!(first.body["userId"].is_i64(), "numeric id: {}", first.body);
    assert_eq!(first.body["message"], "User registered successfully");
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        second.body["message"],
        "User already exists with this email or mobile"
    );
    assert_eq!(backend.users.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn reused_mobile_counts_as_duplicate(registration: Value) {
    let backend = TestBackend::new();
    let mut other = registration.clone();
    other["email"] = json!("grace@example.com");

    post(&backend, "/api/auth/register", registration).await;
    let reply = post(&backend, "/api/auth/register", other).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.users.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn failed_captcha_registers_nobody(registration: Value) {
    let backend = TestBackend::build(TestBackendOptions {
        captcha_accepts: false,
        ..TestBackendOptions::default()
    });

    let reply = post(&backend, "/api/auth/register", registration).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "Captcha verification failed");
    assert!(backend.users.is_empty());
}

#[rstest]
#[actix_web::test]
async fn missing_fields_are_listed(registration: Value) {
    let backend = TestBackend::new();
    let mut partial = registration;
    partial["city"] = json!("  ");
    if let Some(fields) = partial.as_object_mut() {
        fields.remove("mobile");
    }

    let reply = post(&backend, "/api/auth/register", partial).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "All fields are required");
    assert_eq!(reply.body["details"]["missing"], json!(["mobile", "city"]));
    assert!(backend.users.is_empty());
}

#[rstest]
#[actix_web::test]
async fn registered_customer_can_log_in(registration: Value) {
    let backend = TestBackend::new();
    let registered = post(&backend, "/api/auth/register", registration).await;

    let reply = post(
        &backend,
        "/api/auth/login",
        json!({"email": "ada@example.com", "password": "analytical-engine"}),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], "ada@example.com");
    assert_eq!(reply.body["user"]["id"], registered.body["userId"]);
    assert!(reply.body["user"].get("password").is_none());
    let token = reply.body["token"].as_str().expect("token string");
    let identity = backend.tokens.verify(token).expect("token verifies");
    assert!(matches!(identity, Identity::User(user) if user.email == "ada@example.com"));
}

#[rstest]
#[case(json!({"email": "ada@example.com", "password": "wrong"}))]
#[case(json!({"email": "nobody@example.com", "password": "analytical-engine"}))]
#[case(json!({"email": "", "password": ""}))]
#[actix_web::test]
async fn bad_customer_credentials_are_unauthorised(registration: Value, #[case] login: Value) {
    let backend = TestBackend::new();
    post(&backend, "/api/auth/register", registration).await;

    let reply = post(&backend, "/api/auth/login", login).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Invalid email or password");
}

#[rstest]
#[case("admin-password", StatusCode::OK)]
#[case("guess", StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn admin_login_checks_the_stored_hash(
    #[case] password: &str,
    #[case] expected: StatusCode,
) {
    let backend = TestBackend::new();

    let reply = post(
        &backend,
        "/api/admin/login",
        json!({"username": "admin", "password": password}),
    )
    .await;

    assert_eq!(reply.status, expected);
    if expected == StatusCode::OK {
        assert_eq!(reply.body["admin"]["username"], "admin");
        let token = reply.body["token"].as_str().expect("token string");
        assert!(matches!(
            backend.tokens.verify(token),
            Ok(Identity::Admin(_))
        ));
    } else {
        assert_eq!(reply.body["message"], "Invalid username or password");
    }
}
