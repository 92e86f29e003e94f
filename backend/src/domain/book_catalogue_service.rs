//! Book catalogue service implementing the [`BookCatalogue`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{BookCatalogue, BookRepository, BookRepositoryError};
use crate::domain::{
    AdminPrincipal, AuditEntry, Book, BookDraft, BookId, BookPage, BookSearch,
    BookValidationError, Error, NewBook, PageRequest, SearchMode,
};

const BOOK_NOT_FOUND: &str = "Book not found";
const SEARCH_QUERY_REQUIRED: &str = "Search query is required";

/// Catalogue service over a [`BookRepository`].
#[derive(Clone)]
pub struct BookCatalogueService<R> {
    books: Arc<R>,
}

impl<R> BookCatalogueService<R> {
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }
}

fn map_repository_error(error: BookRepositoryError) -> Error {
    debug!(%error, "book repository call failed");
    match error {
        BookRepositoryError::Connection { message } | BookRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

fn map_validation_error(error: &BookValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_book",
    }))
}

/// Turn a raw query into a repository filter for the given mode.
fn search_filter(query: &str, mode: SearchMode) -> Result<BookSearch, Error> {
    let needle = query.trim();
    match mode {
        SearchMode::Public => Ok(BookSearch {
            needle: (!needle.is_empty()).then(|| needle.to_owned()),
            include_description: true,
        }),
        SearchMode::Strict if needle.is_empty() => {
            Err(Error::invalid_request(SEARCH_QUERY_REQUIRED))
        }
        SearchMode::Strict => Ok(BookSearch {
            needle: Some(needle.to_owned()),
            include_description: false,
        }),
    }
}

#[async_trait]
impl<R> BookCatalogue for BookCatalogueService<R>
where
    R: BookRepository,
{
    async fn list_all(&self) -> Result<Vec<Book>, Error> {
        self.books.list_all().await.map_err(map_repository_error)
    }

    async fn list_admin(&self, page: PageRequest) -> Result<BookPage, Error> {
        let (books, total) = self
            .books
            .list_page(page.offset(), i64::from(page.limit()))
            .await
            .map_err(map_repository_error)?;
        Ok(page.into_page(books, total))
    }

    async fn get(&self, id: &BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(BOOK_NOT_FOUND))
    }

    async fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<Book>, Error> {
        let filter = search_filter(query, mode)?;
        self.books
            .search(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Book>, Error> {
        self.books
            .list_by_category(category)
            .await
            .map_err(map_repository_error)
    }

    async fn list_featured(&self) -> Result<Vec<Book>, Error> {
        self.books
            .list_featured()
            .await
            .map_err(map_repository_error)
    }

    async fn create(&self, draft: BookDraft, actor: &AdminPrincipal) -> Result<Book, Error> {
        draft.validate().map_err(|err| map_validation_error(&err))?;
        let new_book = NewBook {
            id: BookId::random(),
            draft,
            created_by: actor.id,
        };
        let book = self
            .books
            .create(&new_book)
            .await
            .map_err(map_repository_error)?;
        info!(book_id = %book.id, admin_id = %actor.id, "book created");
        Ok(book)
    }

    async fn update(
        &self,
        id: &BookId,
        draft: BookDraft,
        actor: &AdminPrincipal,
    ) -> Result<Book, Error> {
        draft.validate().map_err(|err| map_validation_error(&err))?;
        let book = self
            .books
            .update(id, &draft, actor.id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(BOOK_NOT_FOUND))?;
        info!(book_id = %book.id, admin_id = %actor.id, "book updated");
        Ok(book)
    }

    async fn remove(&self, id: &BookId) -> Result<(), Error> {
        let removed = self.books.delete(id).await.map_err(map_repository_error)?;
        info!(book_id = %id, removed, "book delete requested");
        Ok(())
    }

    async fn record_view(&self, id: &BookId) -> Result<(), Error> {
        self.books
            .increment_view_count(id)
            .await
            .map_err(map_repository_error)
    }

    async fn audit_trail(&self, id: &BookId) -> Result<Vec<AuditEntry>, Error> {
        self.books
            .audit_entries(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "book_catalogue_service_tests.rs"]
mod tests;
