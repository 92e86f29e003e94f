//! Book catalogue entities and validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AdminId;

/// Stable book identifier; generated once at creation and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Whether a title is sold in-store or through an external publisher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    #[default]
    Internal,
    External,
}

impl BookType {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl FromStr for BookType {
    type Err = BookValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            _ => Err(BookValidationError::UnknownBookType(s.to_owned())),
        }
    }
}

/// Validation failures for book drafts.
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    InvalidPrice(f64),
    NegativeStock(i32),
    UnknownBookType(String),
}

impl BookValidationError {
    /// Name of the offending JSON field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyAuthor => "author",
            Self::InvalidPrice(_) => "price",
            Self::NegativeStock(_) => "stock",
            Self::UnknownBookType(_) => "bookType",
        }
    }
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::EmptyAuthor => write!(f, "author is required"),
            Self::InvalidPrice(price) => {
                write!(f, "price must be a non-negative number, got {price}")
            }
            Self::NegativeStock(stock) => write!(f, "stock must not be negative, got {stock}"),
            Self::UnknownBookType(raw) => {
                write!(f, "bookType must be 'internal' or 'external', got '{raw}'")
            }
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Editable book fields as submitted by an administrator.
///
/// Serialises to the snapshot stored in the audit log's `new_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub featured: bool,
    pub publisher_url: Option<String>,
    pub book_type: BookType,
}

impl BookDraft {
    /// Check the draft's invariants.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::{BookDraft, BookType, BookValidationError};
    ///
    /// let mut draft = BookDraft {
    ///     title: "Dune".into(),
    ///     author: "Frank Herbert".into(),
    ///     description: String::new(),
    ///     category: None,
    ///     price: 9.99,
    ///     stock: 3,
    ///     image_url: None,
    ///     featured: false,
    ///     publisher_url: None,
    ///     book_type: BookType::Internal,
    /// };
    /// assert!(draft.validate().is_ok());
    /// draft.stock = -1;
    /// assert_eq!(draft.validate(), Err(BookValidationError::NegativeStock(-1)));
    /// ```
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(BookValidationError::InvalidPrice(self.price));
        }
        if self.stock < 0 {
            return Err(BookValidationError::NegativeStock(self.stock));
        }
        Ok(())
    }
}

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub featured: bool,
    pub publisher_url: Option<String>,
    pub book_type: BookType,
    pub view_count: i64,
    pub created_by: Option<AdminId>,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub id: BookId,
    pub draft: BookDraft,
    pub created_by: AdminId,
}

/// One page of the administrator listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

/// Offset pagination request for the administrator listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Parse raw query values, falling back to defaults when absent,
    /// non-numeric, or below one. `limit` is capped at [`Self::MAX_LIMIT`].
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::PageRequest;
    ///
    /// let page = PageRequest::from_raw(Some("abc"), None);
    /// assert_eq!((page.page(), page.limit()), (1, 10));
    /// assert_eq!(PageRequest::from_raw(Some("3"), Some("20")).offset(), 40);
    /// ```
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, default: u32| {
            raw.and_then(|value| value.trim().parse::<u32>().ok())
                .filter(|value| *value >= 1)
                .unwrap_or(default)
        };
        Self {
            page: parse(page, Self::DEFAULT_PAGE),
            limit: parse(limit, Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Assemble a page envelope from the rows and the total row count.
    pub fn into_page(self, books: Vec<Book>, total: i64) -> BookPage {
        let limit = i64::from(self.limit);
        BookPage {
            books,
            total,
            page: self.page,
            limit: self.limit,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// Which search behaviour an endpoint exposes.
///
/// The public storefront and the legacy/admin routes historically disagree
/// on blank queries and on whether descriptions are searched; both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Title, author and description; blank query lists everything.
    Public,
    /// Title and author only; blank query is rejected.
    Strict,
}

/// Search filter handed to repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    /// Trimmed needle; `None` matches every book.
    pub needle: Option<String>,
    pub include_description: bool,
}
