//! Driven port for the payment provider's order API.

use async_trait::async_trait;

use crate::domain::{PaymentOrder, PaymentOrderRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised when talking to the payment provider.
    pub enum PaymentGatewayError {
        /// The request could not be sent or timed out.
        Transport { message: String } => "payment provider unreachable: {message}",
        /// The provider answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "payment provider rejected the order ({status}): {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "payment provider response invalid: {message}",
    }
}

/// Creates remote orders that the client later pays against.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError>;
}
