//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags and `BOOKSTORE_*` environment variables.
//! Optional integrations (payments, captcha) are switched off by leaving
//! their secrets unset.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_UPLOAD_DIR: &str = "uploads/images";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings that are missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be set")]
    Missing { field: &'static str },
    #[error("{field} is invalid: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Runtime configuration for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSTORE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Shared HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Razorpay key id; payments stay disabled without it.
    pub razorpay_key_id: Option<String>,
    /// Razorpay key secret; payments stay disabled without it.
    pub razorpay_key_secret: Option<String>,
    /// Override for the Razorpay API root.
    pub razorpay_api_base: Option<String>,
    /// reCAPTCHA secret; every captcha fails when unset.
    pub recaptcha_secret: Option<String>,
    /// Override for the reCAPTCHA site-verify endpoint.
    pub recaptcha_verify_url: Option<String>,
    /// Directory that receives uploaded cover images.
    pub upload_dir: Option<PathBuf>,
    /// Timeout for outbound HTTP calls, in seconds.
    pub http_timeout_secs: Option<u64>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            field: "bind_addr",
            message: err.to_string(),
        })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        non_blank(self.database_url.as_ref()).ok_or(SettingsError::Missing {
            field: "database_url",
        })
    }

    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn jwt_secret(&self) -> Result<Zeroizing<String>, SettingsError> {
        non_blank(self.jwt_secret.as_ref())
            .map(|secret| Zeroizing::new(secret.to_owned()))
            .ok_or(SettingsError::Missing {
                field: "jwt_secret",
            })
    }

    /// Key id and secret, only when both are present.
    pub fn razorpay_credentials(&self) -> Option<(String, Zeroizing<String>)> {
        let key_id = non_blank(self.razorpay_key_id.as_ref())?;
        let key_secret = non_blank(self.razorpay_key_secret.as_ref())?;
        Some((key_id.to_owned(), Zeroizing::new(key_secret.to_owned())))
    }

    pub fn razorpay_api_base(&self) -> Option<&str> {
        non_blank(self.razorpay_api_base.as_ref())
    }

    pub fn recaptcha_secret(&self) -> Option<Zeroizing<String>> {
        non_blank(self.recaptcha_secret.as_ref()).map(|secret| Zeroizing::new(secret.to_owned()))
    }

    pub fn recaptcha_verify_url(&self) -> Option<&str> {
        non_blank(self.recaptcha_verify_url.as_ref())
    }

    pub fn upload_dir(&self) -> &Path {
        self.upload_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOAD_DIR))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }
}
