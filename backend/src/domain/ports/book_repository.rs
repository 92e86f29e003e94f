//! Driven port for book persistence, including the audit trail.
//!
//! Mutations that must be audited take the acting administrator so the
//! adapter can write the book row and its audit entry in one transaction.

use async_trait::async_trait;

use crate::domain::{AdminId, AuditEntry, Book, BookDraft, BookId, BookSearch, NewBook};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
    }
}

/// Port for reading and mutating books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every book, newest first.
    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// One page of books, newest first, plus the total row count.
    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Book>, i64), BookRepositoryError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Case-insensitive substring search, newest first.
    async fn search(&self, filter: &BookSearch) -> Result<Vec<Book>, BookRepositoryError>;

    /// Books whose category equals `category` exactly.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Book>, BookRepositoryError>;

    async fn list_featured(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Insert a book and append its `CREATE` audit entry atomically.
    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError>;

    /// Overwrite a book and append its `UPDATE` audit entry atomically.
    ///
    /// Returns `None` when no book has the identifier; nothing is written.
    async fn update(
        &self,
        id: &BookId,
        draft: &BookDraft,
        admin_id: AdminId,
    ) -> Result<Option<Book>, BookRepositoryError>;

    /// Delete a book. Returns whether a row was removed.
    async fn delete(&self, id: &BookId) -> Result<bool, BookRepositoryError>;

    /// Atomically add one to the view counter; a missing id is not an error.
    async fn increment_view_count(&self, id: &BookId) -> Result<(), BookRepositoryError>;

    /// Audit entries for a book, newest first.
    async fn audit_entries(&self, id: &BookId) -> Result<Vec<AuditEntry>, BookRepositoryError>;
}
