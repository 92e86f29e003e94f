//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Customer accounts. `email` and `mobile` are each unique.
    users (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        mobile -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        state -> Text,
        city -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue administrators.
    admins (id) {
        id -> Int8,
        username -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    books (id) {
        id -> Uuid,
        title -> Text,
        author -> Text,
        description -> Text,
        category -> Nullable<Text>,
        price -> Float8,
        stock -> Int4,
        image_url -> Nullable<Text>,
        featured -> Bool,
        publisher_url -> Nullable<Text>,
        /// `internal` or `external`.
        book_type -> Text,
        view_count -> Int8,
        created_by -> Nullable<Int8>,
        updated_by -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only before/after snapshots of book changes.
    ///
    /// `book_id` has no foreign key so history survives deletion.
    book_audit_log (id) {
        id -> Int8,
        book_id -> Uuid,
        /// `CREATE` or `UPDATE`.
        action_type -> Text,
        admin_id -> Int8,
        old_values -> Nullable<Jsonb>,
        new_values -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Int8,
        user_id -> Int8,
        total_amount -> Float8,
        razorpay_order_id -> Text,
        /// `pending` or `completed`.
        status -> Text,
        razorpay_payment_id -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Purchased lines with a price snapshot taken at checkout.
    order_items (id) {
        id -> Int8,
        order_id -> Int8,
        book_id -> Uuid,
        quantity -> Int4,
        price -> Float8,
    }
}

diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    admins,
    book_audit_log,
    books,
    order_items,
    orders,
    users,
);
