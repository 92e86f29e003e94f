//! Driven port for order persistence.

use async_trait::async_trait;

use crate::domain::{NewOrder, Order, OrderId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a `pending` order and all of its lines in one transaction.
    async fn create(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError>;

    /// Mark the caller's order `completed` with the payment reference.
    ///
    /// Returns `false` when no order with that id belongs to `user_id`.
    async fn complete(
        &self,
        user_id: UserId,
        order_id: OrderId,
        payment_id: &str,
    ) -> Result<bool, OrderRepositoryError>;

    /// The user's orders with their lines, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderRepositoryError>;
}
