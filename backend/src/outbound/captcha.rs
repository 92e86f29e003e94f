//! Reqwest-backed reCAPTCHA verifier.
//!
//! Fails closed: transport errors, non-success statuses and undecodable
//! bodies are all reported as a failed verification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::HumanVerifier;

/// Google's site-verify endpoint.
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Verifies challenge tokens against a site-verify endpoint.
pub struct RecaptchaVerifier {
    client: Client,
    verify_url: Url,
    secret: Zeroizing<String>,
}

impl RecaptchaVerifier {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        verify_url: Url,
        secret: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            verify_url,
            secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

fn decode_success(body: &[u8]) -> bool {
    match serde_json::from_slice::<VerifyResponse>(body) {
        Ok(response) => {
            if !response.success {
                warn!(error_codes = ?response.error_codes, "captcha rejected");
            }
            response.success
        }
        Err(error) => {
            warn!(%error, "captcha response could not be decoded");
            false
        }
    }
}

#[async_trait]
impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> bool {
        if token.trim().is_empty() {
            return false;
        }
        let form = [("secret", self.secret.as_str()), ("response", token)];
        let response = match self
            .client
            .post(self.verify_url.clone())
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "captcha verification request failed");
                return false;
            }
        };
        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "captcha endpoint returned an error");
            return false;
        }
        match response.bytes().await {
            Ok(body) => decode_success(body.as_ref()),
            Err(error) => {
                warn!(%error, "captcha response body could not be read");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(br#"{"success":true,"hostname":"localhost"}"#.as_slice(), true)]
    #[case(br#"{"success":false,"error-codes":["invalid-input-response"]}"#.as_slice(), false)]
    #[case(br#"{}"#.as_slice(), false)]
    #[case(b"<html>".as_slice(), false)]
    fn only_an_explicit_success_passes(#[case] body: &[u8], #[case] expected: bool) {
        assert_eq!(decode_success(body), expected);
    }

    #[tokio::test]
    async fn blank_tokens_fail_without_a_request() {
        // Port 9 is discard; a request would error, but none is sent.
        let verifier = RecaptchaVerifier::new(
            Url::parse("http://127.0.0.1:9/siteverify").expect("valid url"),
            Zeroizing::new("secret".into()),
            Duration::from_millis(50),
        )
        .expect("client builds");
        assert!(!verifier.verify("   ").await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_closed() {
        let verifier = RecaptchaVerifier::new(
            Url::parse("http://127.0.0.1:9/siteverify").expect("valid url"),
            Zeroizing::new("secret".into()),
            Duration::from_millis(200),
        )
        .expect("client builds");
        assert!(!verifier.verify("token").await);
    }
}
