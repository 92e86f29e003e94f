//! Builders wiring Diesel repositories and outbound adapters into
//! [`HttpState`].

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use url::Url;
use zeroize::Zeroizing;

use bookstore::domain::ports::{HumanVerifier, PaymentGateway, RejectingHumanVerifier};
use bookstore::domain::{AccountService, AccountServicePorts, BookCatalogueService, OrderService};
use bookstore::inbound::http::state::HttpState;
use bookstore::outbound::captcha::RecaptchaVerifier;
use bookstore::outbound::image_store::CapImageStore;
use bookstore::outbound::password::Argon2PasswordHasher;
use bookstore::outbound::payment::{RazorpayCredentials, RazorpayGateway};
use bookstore::outbound::persistence::{
    DbPool, DieselAdminRepository, DieselBookRepository, DieselOrderRepository,
    DieselUserAccountRepository,
};
use bookstore::outbound::token::JwtTokenService;

use super::{IntegrationConfig, ServerConfig};

/// Razorpay gateway when credentials are configured; `None` disables
/// checkout.
fn build_payment_gateway(
    credentials: Option<RazorpayCredentials>,
    api_base: &Url,
    timeout: Duration,
) -> io::Result<Option<Arc<dyn PaymentGateway>>> {
    let Some(credentials) = credentials else {
        warn!("razorpay credentials not configured; checkout is disabled");
        return Ok(None);
    };
    let gateway = RazorpayGateway::new(api_base, credentials, timeout)
        .map_err(|err| io::Error::other(format!("payment gateway setup failed: {err}")))?;
    info!(orders_url = %gateway.orders_url(), "payments enabled");
    Ok(Some(Arc::new(gateway)))
}

/// reCAPTCHA verifier when a secret is configured; otherwise every
/// registration is refused.
fn build_human_verifier(
    secret: Option<Zeroizing<String>>,
    verify_url: Url,
    timeout: Duration,
) -> io::Result<Arc<dyn HumanVerifier>> {
    let Some(secret) = secret else {
        warn!("recaptcha secret not configured; registrations will be refused");
        return Ok(Arc::new(RejectingHumanVerifier));
    };
    let verifier = RecaptchaVerifier::new(verify_url, secret, timeout)
        .map_err(|err| io::Error::other(format!("captcha client setup failed: {err}")))?;
    Ok(Arc::new(verifier))
}

fn build_accounts(
    pool: &DbPool,
    tokens: Arc<JwtTokenService>,
    verifier: Arc<dyn HumanVerifier>,
) -> AccountService {
    AccountService::new(AccountServicePorts {
        users: Arc::new(DieselUserAccountRepository::new(pool.clone())),
        admins: Arc::new(DieselAdminRepository::new(pool.clone())),
        hasher: Arc::new(Argon2PasswordHasher),
        tokens,
        verifier,
    })
}

fn open_image_store(upload_dir: &Path, clock: Arc<dyn Clock>) -> io::Result<CapImageStore> {
    CapImageStore::open(upload_dir, clock).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("failed to open upload directory {}: {err}", upload_dir.display()),
        )
    })
}

/// Assemble handler state from the resolved server configuration.
///
/// # Errors
///
/// Returns an [`io::Error`] when an HTTP client cannot be built or the
/// upload directory cannot be opened.
pub(super) fn build_http_state(config: ServerConfig) -> io::Result<web::Data<HttpState>> {
    let ServerConfig {
        bind_addr: _,
        db_pool,
        jwt_secret,
        upload_dir,
        integrations,
    } = config;
    let IntegrationConfig {
        razorpay,
        razorpay_api_base,
        recaptcha_secret,
        recaptcha_verify_url,
        http_timeout,
    } = integrations;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenService::new(jwt_secret.as_bytes(), clock.clone()));
    let gateway = build_payment_gateway(razorpay, &razorpay_api_base, http_timeout)?;
    let verifier = build_human_verifier(recaptcha_secret, recaptcha_verify_url, http_timeout)?;
    let images = open_image_store(&upload_dir, clock.clone())?;

    let catalogue = BookCatalogueService::new(Arc::new(DieselBookRepository::new(db_pool.clone())));
    let orders = OrderService::new(
        Arc::new(DieselOrderRepository::new(db_pool.clone())),
        gateway,
        clock,
    );
    let accounts = build_accounts(&db_pool, tokens.clone(), verifier);

    Ok(web::Data::new(HttpState {
        catalogue: Arc::new(catalogue),
        orders: Arc::new(orders),
        accounts: Arc::new(accounts),
        tokens,
        images: Arc::new(images),
    }))
}
