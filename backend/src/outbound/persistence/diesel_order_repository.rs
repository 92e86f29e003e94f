//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{NewOrder, Order, OrderId, OrderStatus, UserId};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::{order_items, orders};

fn pool_error(error: PoolError) -> OrderRepositoryError {
    map_pool_error(error, OrderRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(DieselError) -> OrderRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            OrderRepositoryError::query,
            OrderRepositoryError::connection,
        )
    }
}

/// Diesel-backed implementation of the [`OrderRepository`] port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attach each order's lines, keeping the order rows' ordering.
fn assemble_orders(
    rows: Vec<OrderRow>,
    item_rows: Vec<OrderItemRow>,
) -> impl Iterator<Item = Result<Order, String>> {
    let mut lines: HashMap<i64, Vec<OrderItemRow>> = HashMap::new();
    for item in item_rows {
        lines.entry(item.order_id).or_default().push(item);
    }
    rows.into_iter().map(move |row| {
        let items = lines.remove(&row.id).unwrap_or_default();
        row.into_order(items)
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction(|conn| {
            async move {
                let id: i64 = diesel::insert_into(orders::table)
                    .values(NewOrderRow {
                        user_id: order.user_id.get(),
                        total_amount: order.total_amount,
                        razorpay_order_id: &order.razorpay_order_id,
                        status: OrderStatus::Pending.as_str(),
                    })
                    .returning(orders::id)
                    .get_result(conn)
                    .await?;

                let lines: Vec<NewOrderItemRow> = order
                    .items
                    .iter()
                    .map(|item| NewOrderItemRow {
                        order_id: id,
                        book_id: *item.book_id.as_uuid(),
                        quantity: item.quantity,
                        price: item.price,
                    })
                    .collect();
                diesel::insert_into(order_items::table)
                    .values(&lines)
                    .execute(conn)
                    .await?;
                Ok(OrderId::new(id))
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error("create_order"))
    }

    async fn complete(
        &self,
        user_id: UserId,
        order_id: OrderId,
        payment_id: &str,
    ) -> Result<bool, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq(order_id.get()))
                .filter(orders::user_id.eq(user_id.get())),
        )
        .set((
            orders::status.eq(OrderStatus::Completed.as_str()),
            orders::razorpay_payment_id.eq(payment_id),
            orders::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error("complete_order"))?;
        Ok(updated > 0)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user_id.get()))
            .select(OrderRow::as_select())
            .order_by((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error("list_orders"))?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let item_rows: Vec<OrderItemRow> = order_items::table
            .filter(order_items::order_id.eq_any(ids))
            .select(OrderItemRow::as_select())
            .order_by(order_items::id)
            .load(&mut conn)
            .await
            .map_err(diesel_error("list_order_items"))?;

        collect_rows(
            assemble_orders(rows, item_rows),
            OrderRepositoryError::query,
        )
    }
}
