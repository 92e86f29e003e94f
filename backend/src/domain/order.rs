//! Customer orders, cart validation and payment-provider amounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, UserId};

/// Currency every order is charged in.
pub const ORDER_CURRENCY: &str = "INR";

/// Numeric order identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order lifecycle: `pending` until the client reports payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// One cart line as submitted by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub book_id: BookId,
    pub quantity: i32,
    pub price: f64,
}

/// Validation failures for submitted carts.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderValidationError {
    EmptyCart,
    InvalidQuantity { index: usize, quantity: i32 },
    InvalidPrice { index: usize, price: f64 },
    TotalMismatch { expected: f64, submitted: f64 },
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Order must contain at least one item"),
            Self::InvalidQuantity { index, quantity } => {
                write!(f, "item {index}: quantity must be at least 1, got {quantity}")
            }
            Self::InvalidPrice { index, price } => {
                write!(f, "item {index}: price must be a non-negative number, got {price}")
            }
            Self::TotalMismatch {
                expected,
                submitted,
            } => write!(
                f,
                "totalAmount {submitted} does not match the cart total {expected}"
            ),
        }
    }
}

impl std::error::Error for OrderValidationError {}

/// Validated cart with a total consistent with its lines.
///
/// ## Invariants
/// - At least one line; every quantity is at least one.
/// - Every price is finite and non-negative.
/// - `total_amount` equals the sum of `price * quantity` to within half a
///   minor unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    items: Vec<CartItem>,
    total_amount: f64,
}

impl OrderDraft {
    /// Validate a submitted cart.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::{BookId, CartItem, OrderDraft};
    ///
    /// let item = CartItem { book_id: BookId::random(), quantity: 2, price: 4.99 };
    /// let draft = OrderDraft::try_new(vec![item], 9.98).unwrap();
    /// assert_eq!(draft.amount_minor(), 998);
    /// ```
    pub fn try_new(items: Vec<CartItem>, total_amount: f64) -> Result<Self, OrderValidationError> {
        if items.is_empty() {
            return Err(OrderValidationError::EmptyCart);
        }
        let mut expected = 0.0_f64;
        for (index, item) in items.iter().enumerate() {
            if item.quantity < 1 {
                return Err(OrderValidationError::InvalidQuantity {
                    index,
                    quantity: item.quantity,
                });
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(OrderValidationError::InvalidPrice {
                    index,
                    price: item.price,
                });
            }
            expected += item.price * f64::from(item.quantity);
        }
        if !total_amount.is_finite() || (expected - total_amount).abs() >= 0.005 {
            return Err(OrderValidationError::TotalMismatch {
                expected,
                submitted: total_amount,
            });
        }
        Ok(Self {
            items,
            total_amount,
        })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Total in the currency's minor unit (paise).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "validated totals are far below i64::MAX minor units"
    )]
    pub fn amount_minor(&self) -> i64 {
        (self.total_amount * 100.0).round() as i64
    }
}

/// Request for a remote payment-provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOrderRequest {
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

impl PaymentOrderRequest {
    /// Build a request with an `order_rcpt_<millis>` receipt.
    pub fn new(amount: i64, now: DateTime<Utc>) -> Self {
        Self {
            amount,
            currency: ORDER_CURRENCY.to_owned(),
            receipt: format!("order_rcpt_{}", now.timestamp_millis()),
        }
    }
}

/// Remote order created by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Order row plus lines ready for insertion in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub total_amount: f64,
    pub razorpay_order_id: String,
    pub items: Vec<CartItem>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub razorpay_order_id: String,
    /// Amount in minor units, as charged by the provider.
    pub amount: i64,
}

/// Purchased line with its price snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub book_id: BookId,
    pub quantity: i32,
    pub price: f64,
}

/// Persisted order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_amount: f64,
    pub razorpay_order_id: String,
    pub status: OrderStatus,
    pub razorpay_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}
