//! Checkout handlers for authenticated customers.
//!
//! ```text
//! POST /api/orders {"items":[{"bookId":"...","quantity":1,"price":499}],"totalAmount":499}
//! GET /api/orders
//! POST /api/orders/{orderId}/complete {"paymentId":"pay_123"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CartItem, Order, PlacedOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerUser;
use crate::inbound::http::schemas::{CartItemSchema, ErrorSchema, OrderSchema, PlacedOrderSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, order_id_or_not_found};

/// Cart submitted at checkout.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    #[schema(value_type = Vec<CartItemSchema>)]
    pub items: Vec<CartItem>,
    /// Client-computed total in rupees; must equal the sum of the lines.
    pub total_amount: Option<f64>,
}

/// Payment reference reported by the client after checkout.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrderRequest {
    #[serde(alias = "razorpayPaymentId", alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
}

/// Create a payment-provider order and a pending local order.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order created", body = PlacedOrderSchema),
        (status = 400, description = "Invalid cart", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Payment disabled or provider failure", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    CallerUser(customer): CallerUser,
    payload: web::Json<PlaceOrderRequest>,
) -> ApiResult<web::Json<PlacedOrder>> {
    let PlaceOrderRequest {
        items,
        total_amount,
    } = payload.into_inner();
    let total_amount =
        total_amount.ok_or_else(|| missing_field_error(FieldName::new("totalAmount")))?;
    let placed = state.orders.place(&customer, items, total_amount).await?;
    Ok(web::Json(placed))
}

/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders", body = [OrderSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    CallerUser(customer): CallerUser,
) -> ApiResult<web::Json<Vec<Order>>> {
    Ok(web::Json(state.orders.list(&customer).await?))
}

/// Mark the caller's order as paid. The reference is not checked with the
/// payment provider.
#[utoipa::path(
    post,
    path = "/api/orders/{orderId}/complete",
    params(("orderId" = i64, Path, description = "Order id")),
    request_body = CompleteOrderRequest,
    responses(
        (status = 200, description = "Order completed"),
        (status = 400, description = "Missing payment id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "completeOrder"
)]
#[post("/orders/{order_id}/complete")]
pub async fn complete_order(
    state: web::Data<HttpState>,
    CallerUser(customer): CallerUser,
    path: web::Path<String>,
    payload: web::Json<CompleteOrderRequest>,
) -> ApiResult<HttpResponse> {
    let order_id = order_id_or_not_found(&path)?;
    let payment_id = payload.into_inner().payment_id.unwrap_or_default();
    state
        .orders
        .complete(&customer, order_id, payment_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Order completed successfully" })))
}
