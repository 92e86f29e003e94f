//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.
//!
//! Book mutations and their audit entries are written in the same
//! transaction, so a failed audit insert rolls the book change back.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{
    AdminId, AuditEntry, Book, BookDraft, BookId, BookSearch, NewAuditEntry, NewBook,
};

use super::diesel_helpers::{collect_rows, contains_pattern, map_diesel_error, map_pool_error};
use super::models::{AuditRow, BookRow, BookUpdate, NewAuditRow, NewBookRow};
use super::pool::{DbPool, PoolError};
use super::schema::{book_audit_log, books};

/// Diesel-backed implementation of the [`BookRepository`] port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        BookRepositoryError,
    > {
        self.pool.get().await.map_err(pool_error)
    }
}

fn pool_error(error: PoolError) -> BookRepositoryError {
    map_pool_error(error, BookRepositoryError::connection)
}

fn diesel_error(operation: &'static str) -> impl FnOnce(DieselError) -> BookRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            BookRepositoryError::query,
            BookRepositoryError::connection,
        )
    }
}

fn into_books(rows: Vec<BookRow>) -> Result<Vec<Book>, BookRepositoryError> {
    collect_rows(rows.into_iter().map(Book::try_from), BookRepositoryError::query)
}

/// Convert inside a transaction, surfacing malformed rows as Diesel errors.
fn row_to_book(row: BookRow) -> Result<Book, DieselError> {
    Book::try_from(row).map_err(|message| DieselError::DeserializationError(message.into()))
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<BookRow> = books::table
            .select(BookRow::as_select())
            .order_by((books::created_at.desc(), books::id))
            .load(&mut conn)
            .await
            .map_err(diesel_error("list_all"))?;
        into_books(rows)
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Book>, i64), BookRepositoryError> {
        let mut conn = self.connection().await?;
        // One snapshot so `total` agrees with the page under concurrent writes.
        let (rows, total) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = books::table.count().get_result(conn).await?;
                    let rows: Vec<BookRow> = books::table
                        .select(BookRow::as_select())
                        .order_by((books::created_at.desc(), books::id))
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    Ok::<_, DieselError>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error("list_page"))?;
        Ok((into_books(rows)?, total))
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<BookRow> = books::table
            .find(id.as_uuid())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("find_by_id"))?;
        row.map(Book::try_from)
            .transpose()
            .map_err(BookRepositoryError::query)
    }

    async fn search(&self, filter: &BookSearch) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let mut query = books::table.select(BookRow::as_select()).into_boxed();
        if let Some(needle) = filter.needle.as_deref() {
            let pattern = contains_pattern(needle);
            query = if filter.include_description {
                query.filter(
                    books::title
                        .ilike(pattern.clone())
                        .or(books::author.ilike(pattern.clone()))
                        .or(books::description.ilike(pattern)),
                )
            } else {
                query.filter(
                    books::title
                        .ilike(pattern.clone())
                        .or(books::author.ilike(pattern)),
                )
            };
        }
        let rows: Vec<BookRow> = query
            .order_by((books::created_at.desc(), books::id))
            .load(&mut conn)
            .await
            .map_err(diesel_error("search"))?;
        into_books(rows)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<BookRow> = books::table
            .filter(books::category.eq(category))
            .select(BookRow::as_select())
            .order_by((books::created_at.desc(), books::id))
            .load(&mut conn)
            .await
            .map_err(diesel_error("list_by_category"))?;
        into_books(rows)
    }

    async fn list_featured(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<BookRow> = books::table
            .filter(books::featured.eq(true))
            .select(BookRow::as_select())
            .order_by((books::created_at.desc(), books::id))
            .load(&mut conn)
            .await
            .map_err(diesel_error("list_featured"))?;
        into_books(rows)
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let audit = NewAuditEntry::created(book.id, book.created_by, &book.draft);
        conn.transaction(|conn| {
            async move {
                let row: BookRow = diesel::insert_into(books::table)
                    .values(NewBookRow::from(book))
                    .returning(BookRow::as_returning())
                    .get_result(conn)
                    .await?;
                diesel::insert_into(book_audit_log::table)
                    .values(NewAuditRow::from(&audit))
                    .execute(conn)
                    .await?;
                row_to_book(row)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error("create"))
    }

    async fn update(
        &self,
        id: &BookId,
        draft: &BookDraft,
        admin_id: AdminId,
    ) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let uuid = *id.as_uuid();
        conn.transaction(|conn| {
            async move {
                let prior: Option<BookRow> = books::table
                    .find(uuid)
                    .select(BookRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(prior) = prior else {
                    return Ok(None);
                };
                let prior = row_to_book(prior)?;

                let row: BookRow = diesel::update(books::table.find(uuid))
                    .set(BookUpdate::new(draft, admin_id, Utc::now()))
                    .returning(BookRow::as_returning())
                    .get_result(conn)
                    .await?;
                let audit = NewAuditEntry::updated(&prior, admin_id, draft);
                diesel::insert_into(book_audit_log::table)
                    .values(NewAuditRow::from(&audit))
                    .execute(conn)
                    .await?;
                row_to_book(row).map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error("update"))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let removed = diesel::delete(books::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error("delete"))?;
        Ok(removed > 0)
    }

    async fn increment_view_count(&self, id: &BookId) -> Result<(), BookRepositoryError> {
        let mut conn = self.connection().await?;
        diesel::update(books::table.find(id.as_uuid()))
            .set(books::view_count.eq(books::view_count + 1))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error("increment_view_count"))
    }

    async fn audit_entries(&self, id: &BookId) -> Result<Vec<AuditEntry>, BookRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<AuditRow> = book_audit_log::table
            .filter(book_audit_log::book_id.eq(id.as_uuid()))
            .select(AuditRow::as_select())
            .order_by((book_audit_log::created_at.desc(), book_audit_log::id.desc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error("audit_entries"))?;
        collect_rows(
            rows.into_iter().map(AuditEntry::try_from),
            BookRepositoryError::query,
        )
    }
}
