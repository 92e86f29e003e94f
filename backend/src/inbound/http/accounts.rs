//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com",...,"captchaToken":"..."}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret"}
//! POST /api/admin/login {"username":"root","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{AdminSession, UserSession};
use crate::domain::{Error, LoginCredentials, RegistrationInput, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AdminSessionSchema, ErrorSchema, UserSessionSchema};
use crate::inbound::http::state::HttpState;

/// Customer registration payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub mobile: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Token produced by the client-side human verification widget.
    #[serde(alias = "recaptchaToken")]
    pub captcha_token: Option<String>,
}

impl RegisterRequest {
    fn into_parts(self) -> (RegistrationInput, Option<String>) {
        let input = RegistrationInput {
            name: self.name,
            email: self.email,
            password: self.password,
            mobile: self.mobile,
            state: self.state,
            city: self.city,
        };
        (input, self.captcha_token)
    }
}

/// Body returned by a successful registration.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[schema(value_type = i64, example = 7)]
    pub user_id: UserId,
}

/// Customer login payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

/// Administrator login payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Blank credentials fail the same way as wrong ones.
fn credentials_or(
    login: &str,
    password: &str,
    message: &'static str,
) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from_parts(login, password).map_err(|err| {
        warn!(reason = %err, "login rejected before lookup");
        Error::unauthorized(message)
    })
}

/// Register a customer account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = RegisterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let (input, captcha_token) = payload.into_inner().into_parts();
    let user_id = state.accounts.register(input, captcha_token).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_owned(),
        user_id,
    }))
}

/// Exchange customer credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = UserLoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserSessionSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "loginUser",
    security([])
)]
#[post("/auth/login")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserLoginRequest>,
) -> ApiResult<web::Json<UserSession>> {
    let credentials = credentials_or(
        &payload.email,
        &payload.password,
        "Invalid email or password",
    )?;
    Ok(web::Json(state.accounts.login_user(&credentials).await?))
}

/// Exchange administrator credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login success", body = AdminSessionSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "loginAdmin",
    security([])
)]
#[post("/login")]
pub async fn login_admin(
    state: web::Data<HttpState>,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<web::Json<AdminSession>> {
    let credentials = credentials_or(
        &payload.username,
        &payload.password,
        "Invalid username or password",
    )?;
    Ok(web::Json(state.accounts.login_admin(&credentials).await?))
}
