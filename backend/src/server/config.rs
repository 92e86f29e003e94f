//! HTTP server configuration resolved from [`AppSettings`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use bookstore::outbound::captcha::DEFAULT_RECAPTCHA_VERIFY_URL;
use bookstore::outbound::payment::{DEFAULT_RAZORPAY_API_BASE, RazorpayCredentials};
use bookstore::outbound::persistence::DbPool;
use bookstore::settings::{AppSettings, SettingsError};
use url::Url;
use zeroize::Zeroizing;

/// Third-party integrations and their client settings.
pub struct IntegrationConfig {
    pub(crate) razorpay: Option<RazorpayCredentials>,
    pub(crate) razorpay_api_base: Url,
    pub(crate) recaptcha_secret: Option<Zeroizing<String>>,
    pub(crate) recaptcha_verify_url: Url,
    pub(crate) http_timeout: Duration,
}

fn parse_url(field: &'static str, raw: Option<&str>, default: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.unwrap_or(default)).map_err(|err| SettingsError::Invalid {
        field,
        message: err.to_string(),
    })
}

impl IntegrationConfig {
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when an endpoint override is not a
    /// URL.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            razorpay: settings
                .razorpay_credentials()
                .map(|(key_id, key_secret)| RazorpayCredentials { key_id, key_secret }),
            razorpay_api_base: parse_url(
                "razorpay_api_base",
                settings.razorpay_api_base(),
                DEFAULT_RAZORPAY_API_BASE,
            )?,
            recaptcha_secret: settings.recaptcha_secret(),
            recaptcha_verify_url: parse_url(
                "recaptcha_verify_url",
                settings.recaptcha_verify_url(),
                DEFAULT_RECAPTCHA_VERIFY_URL,
            )?,
            http_timeout: settings.http_timeout(),
        })
    }
}

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) jwt_secret: Zeroizing<String>,
    pub(crate) upload_dir: PathBuf,
    pub(crate) integrations: IntegrationConfig,
}

impl ServerConfig {
    /// Resolve settings around an already-built pool.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] for a missing JWT secret or any malformed
    /// address or URL.
    pub fn from_settings(settings: &AppSettings, db_pool: DbPool) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            db_pool,
            jwt_secret: settings.jwt_secret()?,
            upload_dir: settings.upload_dir().to_path_buf(),
            integrations: IntegrationConfig::from_settings(settings)?,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
