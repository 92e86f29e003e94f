//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Row-to-domain conversions return a plain
//! message on malformed data so repositories can wrap it in their own error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Admin, AdminAccount, AdminId, AuditAction, AuditEntry, Book, BookDraft, BookId, BookType,
    NewAuditEntry, NewBook, NewUser, Order, OrderId, OrderItem, OrderStatus, User, UserAccount,
    UserId,
};

use super::schema::{admins, book_audit_log, books, order_items, orders, users};

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub featured: bool,
    pub publisher_url: Option<String>,
    pub book_type: String,
    pub view_count: i64,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = String;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let book_type = row
            .book_type
            .parse::<BookType>()
            .map_err(|err| format!("book {}: {err}", row.id))?;
        Ok(Self {
            id: BookId::from_uuid(row.id),
            title: row.title,
            author: row.author,
            description: row.description,
            category: row.category,
            price: row.price,
            stock: row.stock,
            image_url: row.image_url,
            featured: row.featured,
            publisher_url: row.publisher_url,
            book_type,
            view_count: row.view_count,
            created_by: row.created_by.map(AdminId::new),
            updated_by: row.updated_by.map(AdminId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub category: Option<&'a str>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub featured: bool,
    pub publisher_url: Option<&'a str>,
    pub book_type: &'static str,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}

impl<'a> From<&'a NewBook> for NewBookRow<'a> {
    fn from(book: &'a NewBook) -> Self {
        let draft = &book.draft;
        Self {
            id: *book.id.as_uuid(),
            title: &draft.title,
            author: &draft.author,
            description: &draft.description,
            category: draft.category.as_deref(),
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url.as_deref(),
            featured: draft.featured,
            publisher_url: draft.publisher_url.as_deref(),
            book_type: draft.book_type.as_str(),
            created_by: Some(book.created_by.get()),
            updated_by: Some(book.created_by.get()),
        }
    }
}

/// Full overwrite of the editable columns. `None` clears nullable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books, treat_none_as_null = true)]
pub(crate) struct BookUpdate<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub category: Option<&'a str>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub featured: bool,
    pub publisher_url: Option<&'a str>,
    pub book_type: &'static str,
    pub updated_by: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> BookUpdate<'a> {
    pub fn new(draft: &'a BookDraft, actor: AdminId, now: DateTime<Utc>) -> Self {
        Self {
            title: &draft.title,
            author: &draft.author,
            description: &draft.description,
            category: draft.category.as_deref(),
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url.as_deref(),
            featured: draft.featured,
            publisher_url: draft.publisher_url.as_deref(),
            book_type: draft.book_type.as_str(),
            updated_by: Some(actor.get()),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = book_audit_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuditRow {
    pub id: i64,
    pub book_id: Uuid,
    pub action_type: String,
    pub admin_id: i64,
    pub old_values: Option<serde_json::Value>,
    pub new_values: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

fn parse_audit_action(raw: &str) -> Result<AuditAction, String> {
    match raw {
        "CREATE" => Ok(AuditAction::Create),
        "UPDATE" => Ok(AuditAction::Update),
        other => Err(format!("unknown audit action `{other}`")),
    }
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = String;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            book_id: BookId::from_uuid(row.book_id),
            action_type: parse_audit_action(&row.action_type)?,
            admin_id: AdminId::new(row.admin_id),
            old_values: row.old_values,
            new_values: row.new_values,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = book_audit_log)]
pub(crate) struct NewAuditRow<'a> {
    pub book_id: Uuid,
    pub action_type: &'static str,
    pub admin_id: i64,
    pub old_values: Option<&'a serde_json::Value>,
    pub new_values: &'a serde_json::Value,
}

impl<'a> From<&'a NewAuditEntry> for NewAuditRow<'a> {
    fn from(entry: &'a NewAuditEntry) -> Self {
        Self {
            book_id: *entry.book_id.as_uuid(),
            action_type: entry.action.as_str(),
            admin_id: entry.admin_id.get(),
            old_values: entry.old_values.as_ref(),
            new_values: &entry.new_values,
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
    pub state: String,
    pub city: String,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: UserId::new(row.id),
                name: row.name,
                email: row.email,
                mobile: row.mobile,
                state: row.state,
                city: row.city,
            },
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub mobile: &'a str,
    pub password_hash: &'a str,
    pub state: &'a str,
    pub city: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
            mobile: &user.mobile,
            password_hash: &user.password_hash,
            state: &user.state,
            city: &user.city,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl From<AdminRow> for AdminAccount {
    fn from(row: AdminRow) -> Self {
        Self {
            admin: Admin {
                id: AdminId::new(row.id),
                username: row.username,
            },
            password_hash: row.password_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    pub razorpay_order_id: String,
    pub status: String,
    pub razorpay_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn parse_order_status(raw: &str) -> Result<OrderStatus, String> {
    match raw {
        "pending" => Ok(OrderStatus::Pending),
        "completed" => Ok(OrderStatus::Completed),
        other => Err(format!("unknown order status `{other}`")),
    }
}

impl OrderRow {
    /// Combine the order row with its already-loaded item rows.
    pub fn into_order(self, items: Vec<OrderItemRow>) -> Result<Order, String> {
        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount: self.total_amount,
            razorpay_order_id: self.razorpay_order_id,
            status: parse_order_status(&self.status)?,
            razorpay_payment_id: self.razorpay_payment_id,
            created_at: self.created_at,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub user_id: i64,
    pub total_amount: f64,
    pub razorpay_order_id: &'a str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderItemRow {
    pub order_id: i64,
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            book_id: BookId::from_uuid(row.book_id),
            quantity: row.quantity,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub(crate) struct NewOrderItemRow {
    pub order_id: i64,
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: f64,
}
