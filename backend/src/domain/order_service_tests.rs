//! Tests for the order service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockOrderRepository, MockPaymentGateway};
use crate::domain::{BookId, ErrorCode, PaymentOrder, UserId};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn clock() -> Arc<dyn Clock> {
    let now = Utc
        .timestamp_millis_opt(1_700_000_000_000)
        .single()
        .expect("valid timestamp");
    Arc::new(FixedClock(now))
}

#[fixture]
fn customer() -> UserPrincipal {
    UserPrincipal {
        id: UserId::new(9),
        email: "reader@example.com".into(),
    }
}

fn cart() -> Vec<CartItem> {
    vec![
        CartItem {
            book_id: BookId::random(),
            quantity: 2,
            price: 4.99,
        },
        CartItem {
            book_id: BookId::random(),
            quantity: 1,
            price: 10.0,
        },
    ]
}

#[rstest]
#[tokio::test]
async fn place_without_gateway_fails_and_writes_nothing(customer: UserPrincipal) {
    let mut repo = MockOrderRepository::new();
    repo.expect_create().never();
    let service = OrderService::new(Arc::new(repo), None, clock());

    let error = service
        .place(&customer, cart(), 19.98)
        .await
        .expect_err("payments disabled");
    assert_eq!(error.code(), ErrorCode::FeatureDisabled);
}

#[rstest]
#[tokio::test]
async fn place_charges_minor_units_and_persists_lines(customer: UserPrincipal) {
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_order()
        .withf(|request| {
            request.amount == 1998
                && request.currency == "INR"
                && request.receipt == "order_rcpt_1700000000000"
        })
        .times(1)
        .return_once(|request| {
            Ok(PaymentOrder {
                id: "order_remote_1".into(),
                amount: request.amount,
                currency: request.currency.clone(),
            })
        });
    let mut repo = MockOrderRepository::new();
    repo.expect_create()
        .withf(|order| {
            order.items.len() == 2
                && order.razorpay_order_id == "order_remote_1"
                && order.user_id == UserId::new(9)
        })
        .times(1)
        .return_once(|_| Ok(OrderId::new(77)));

    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let service = OrderService::new(Arc::new(repo), Some(gateway), clock());
    let placed = service
        .place(&customer, cart(), 19.98)
        .await
        .expect("order placed");

    assert_eq!(placed.order_id, OrderId::new(77));
    assert_eq!(placed.razorpay_order_id, "order_remote_1");
    assert_eq!(placed.amount, 1998);
}

#[rstest]
#[tokio::test]
async fn place_rejects_mismatched_totals_before_calling_the_provider(customer: UserPrincipal) {
    let mut gateway = MockPaymentGateway::new();
    gateway.expect_create_order().never();
    let mut repo = MockOrderRepository::new();
    repo.expect_create().never();

    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let service = OrderService::new(Arc::new(repo), Some(gateway), clock());
    let error = service
        .place(&customer, cart(), 1.0)
        .await
        .expect_err("mismatch");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn provider_failure_leaves_store_untouched(customer: UserPrincipal) {
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_order()
        .times(1)
        .return_once(|_| Err(PaymentGatewayError::rejected(401_u16, "bad key")));
    let mut repo = MockOrderRepository::new();
    repo.expect_create().never();

    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let service = OrderService::new(Arc::new(repo), Some(gateway), clock());
    let error = service
        .place(&customer, cart(), 19.98)
        .await
        .expect_err("provider failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn complete_checks_that_a_row_matched(
    customer: UserPrincipal,
    #[case] matched: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_complete()
        .withf(|user, order, payment| {
            *user == UserId::new(9) && *order == OrderId::new(5) && payment == "pay_1"
        })
        .times(1)
        .return_once(move |_, _, _| Ok(matched));

    let service = OrderService::new(Arc::new(repo), None, clock());
    let outcome = service
        .complete(&customer, OrderId::new(5), " pay_1 ".into())
        .await
        .err()
        .map(|err| err.code());
    assert_eq!(outcome, expected);
}
