//! Reqwest-backed Razorpay order adapter.
//!
//! Owns transport details only: basic authentication, request timeout,
//! status mapping and decoding of the order payload.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ports::{PaymentGateway, PaymentGatewayError};
use crate::domain::{PaymentOrder, PaymentOrderRequest};

/// Public Razorpay API root.
pub const DEFAULT_RAZORPAY_API_BASE: &str = "https://api.razorpay.com";

/// API key pair issued by the provider.
pub struct RazorpayCredentials {
    pub key_id: String,
    pub key_secret: Zeroizing<String>,
}

/// Payment gateway creating orders through `POST /v1/orders`.
pub struct RazorpayGateway {
    client: Client,
    orders_url: Url,
    credentials: RazorpayCredentials,
}

impl RazorpayGateway {
    /// Build a gateway against `api_base` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns a decode error when `api_base` cannot be joined with the
    /// orders path, or a transport error when the client cannot be built.
    pub fn new(
        api_base: &Url,
        credentials: RazorpayCredentials,
        timeout: Duration,
    ) -> Result<Self, PaymentGatewayError> {
        let orders_url = api_base
            .join("v1/orders")
            .map_err(|err| PaymentGatewayError::decode(format!("invalid API base: {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PaymentGatewayError::transport(err.to_string()))?;
        Ok(Self {
            client,
            orders_url,
            credentials,
        })
    }

    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }
}

/// Subset of the provider's order resource that checkout needs.
#[derive(Debug, Deserialize)]
struct OrderDto {
    id: String,
    amount: i64,
    currency: String,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError> {
        let response = self
            .client
            .post(self.orders_url.clone())
            .basic_auth(
                &self.credentials.key_id,
                Some(self.credentials.key_secret.as_str()),
            )
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_order(body.as_ref())
    }
}

fn parse_order(body: &[u8]) -> Result<PaymentOrder, PaymentGatewayError> {
    let dto: OrderDto = serde_json::from_slice(body)
        .map_err(|err| PaymentGatewayError::decode(format!("invalid order payload: {err}")))?;
    Ok(PaymentOrder {
        id: dto.id,
        amount: dto.amount,
        currency: dto.currency,
    })
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    PaymentGatewayError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    PaymentGatewayError::rejected(status.as_u16(), preview)
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for URL building and payload mapping.

    use super::*;
    use rstest::rstest;

    fn credentials() -> RazorpayCredentials {
        RazorpayCredentials {
            key_id: "rzp_test".into(),
            key_secret: Zeroizing::new("secret".into()),
        }
    }

    #[rstest]
    #[case("https://api.razorpay.com", "https://api.razorpay.com/v1/orders")]
    #[case("http://localhost:9000/", "http://localhost:9000/v1/orders")]
    fn orders_url_is_joined_to_the_base(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid url");
        let gateway = RazorpayGateway::new(&base, credentials(), Duration::from_secs(1))
            .expect("gateway builds");
        assert_eq!(gateway.orders_url().as_str(), expected);
    }

    #[rstest]
    fn decodes_order_payload_ignoring_extra_fields() {
        let body = br#"{"id":"order_9A33XWu170gUtm","entity":"order","amount":998,"currency":"INR","status":"created"}"#;
        let order = parse_order(body).expect("payload decodes");
        assert_eq!(
            order,
            PaymentOrder {
                id: "order_9A33XWu170gUtm".into(),
                amount: 998,
                currency: "INR".into(),
            }
        );
    }

    #[rstest]
    fn malformed_payload_is_a_decode_error() {
        let err = parse_order(b"{\"amount\":1}").expect_err("missing id");
        assert!(matches!(err, PaymentGatewayError::Decode { .. }));
    }

    #[rstest]
    fn non_success_status_keeps_code_and_compacted_body() {
        let err = map_status_error(
            StatusCode::UNAUTHORIZED,
            b"{\n  \"error\": \"Authentication failed\"\n}",
        );
        assert_eq!(
            err,
            PaymentGatewayError::rejected(401_u16, "{ \"error\": \"Authentication failed\" }")
        );
    }
}
