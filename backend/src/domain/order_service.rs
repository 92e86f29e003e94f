//! Order service implementing the [`OrderCommand`] driving port.
//!
//! Checkout first reserves a charge with the payment provider, then persists
//! the order and its lines atomically. Completion trusts the payment
//! reference reported by the client; no provider-side verification happens.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    OrderCommand, OrderRepository, OrderRepositoryError, PaymentGateway, PaymentGatewayError,
};
use crate::domain::{
    CartItem, Error, NewOrder, Order, OrderDraft, OrderId, PaymentOrderRequest, PlacedOrder,
    UserPrincipal,
};

const PAYMENTS_DISABLED: &str = "Payment service is not configured";

/// Order service over an [`OrderRepository`] and an optional payment gateway.
#[derive(Clone)]
pub struct OrderService<R> {
    orders: Arc<R>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    clock: Arc<dyn Clock>,
}

impl<R> OrderService<R> {
    /// Create the service. Without a gateway every checkout fails with
    /// `feature_disabled` and nothing is written.
    pub fn new(
        orders: Arc<R>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            gateway,
            clock,
        }
    }
}

fn map_repository_error(error: OrderRepositoryError) -> Error {
    debug!(%error, "order repository call failed");
    match error {
        OrderRepositoryError::Connection { message } | OrderRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

fn map_gateway_error(error: PaymentGatewayError) -> Error {
    warn!(%error, "payment provider call failed");
    Error::internal(error.to_string())
}

#[async_trait]
impl<R> OrderCommand for OrderService<R>
where
    R: OrderRepository,
{
    async fn place(
        &self,
        customer: &UserPrincipal,
        items: Vec<CartItem>,
        total_amount: f64,
    ) -> Result<PlacedOrder, Error> {
        let Some(gateway) = self.gateway.as_ref() else {
            return Err(Error::feature_disabled(PAYMENTS_DISABLED));
        };
        let draft = OrderDraft::try_new(items, total_amount)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let request = PaymentOrderRequest::new(draft.amount_minor(), self.clock.utc());
        let remote = gateway
            .create_order(&request)
            .await
            .map_err(map_gateway_error)?;

        let total_amount = draft.total_amount();
        let new_order = NewOrder {
            user_id: customer.id,
            total_amount,
            razorpay_order_id: remote.id.clone(),
            items: draft.items().to_vec(),
        };
        let order_id = self
            .orders
            .create(&new_order)
            .await
            .map_err(map_repository_error)?;

        info!(
            order_id = %order_id,
            user_id = %customer.id,
            razorpay_order_id = %remote.id,
            amount = request.amount,
            "order created"
        );
        Ok(PlacedOrder {
            order_id,
            razorpay_order_id: remote.id,
            amount: request.amount,
        })
    }

    async fn complete(
        &self,
        customer: &UserPrincipal,
        order_id: OrderId,
        payment_id: String,
    ) -> Result<(), Error> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(Error::invalid_request("paymentId is required"));
        }
        let updated = self
            .orders
            .complete(customer.id, order_id, payment_id)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("Order not found"));
        }
        info!(order_id = %order_id, user_id = %customer.id, "order completed");
        Ok(())
    }

    async fn list(&self, customer: &UserPrincipal) -> Result<Vec<Order>, Error> {
        self.orders
            .list_for_user(customer.id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
