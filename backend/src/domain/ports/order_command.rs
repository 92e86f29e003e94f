//! Driving port for checkout and order completion.

use async_trait::async_trait;

use crate::domain::{CartItem, Error, Order, OrderId, PlacedOrder, UserPrincipal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Create a payment-provider order and persist the local order.
    async fn place(
        &self,
        customer: &UserPrincipal,
        items: Vec<CartItem>,
        total_amount: f64,
    ) -> Result<PlacedOrder, Error>;

    /// Record a client-reported payment against the customer's order.
    async fn complete(
        &self,
        customer: &UserPrincipal,
        order_id: OrderId,
        payment_id: String,
    ) -> Result<(), Error>;

    async fn list(&self, customer: &UserPrincipal) -> Result<Vec<Order>, Error>;
}
