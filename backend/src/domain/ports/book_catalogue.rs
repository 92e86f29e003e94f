//! Driving port for the book catalogue.
//!
//! Inbound adapters call this port for every book operation, public and
//! administrative, without depending on the persistence adapter.

use async_trait::async_trait;

use crate::domain::{
    AdminPrincipal, AuditEntry, Book, BookDraft, BookId, BookPage, Error, PageRequest, SearchMode,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogue: Send + Sync {
    /// Every book, newest first.
    async fn list_all(&self) -> Result<Vec<Book>, Error>;

    /// Paginated listing for administrators.
    async fn list_admin(&self, page: PageRequest) -> Result<BookPage, Error>;

    /// Fetch one book or fail with `not_found`.
    async fn get(&self, id: &BookId) -> Result<Book, Error>;

    /// Substring search; see [`SearchMode`] for blank-query handling.
    async fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<Book>, Error>;

    async fn list_by_category(&self, category: &str) -> Result<Vec<Book>, Error>;

    async fn list_featured(&self) -> Result<Vec<Book>, Error>;

    /// Validate and insert a book, recording a `CREATE` audit entry.
    async fn create(&self, draft: BookDraft, actor: &AdminPrincipal) -> Result<Book, Error>;

    /// Validate and overwrite a book, recording an `UPDATE` audit entry.
    async fn update(
        &self,
        id: &BookId,
        draft: BookDraft,
        actor: &AdminPrincipal,
    ) -> Result<Book, Error>;

    /// Delete a book; deleting an unknown id succeeds.
    async fn remove(&self, id: &BookId) -> Result<(), Error>;

    /// Count one view of a book.
    async fn record_view(&self, id: &BookId) -> Result<(), Error>;

    /// Audit history for a book, newest first.
    async fn audit_trail(&self, id: &BookId) -> Result<Vec<AuditEntry>, Error>;
}
