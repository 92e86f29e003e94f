//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{BookId, Error, OrderId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_value_error(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

/// Map extractor failures (bad JSON, bad query strings) to `invalid_request`.
pub(crate) fn malformed_body_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": ErrorCode::MalformedBody.as_str(),
    }))
}

/// Parse a path segment as a book id; malformed ids are reported as missing.
pub(crate) fn book_id_or_not_found(raw: &str) -> Result<BookId, Error> {
    raw.parse().map_err(|_| Error::not_found("Book not found"))
}

/// Parse a path segment as an order id; malformed ids are reported as missing.
pub(crate) fn order_id_or_not_found(raw: &str) -> Result<OrderId, Error> {
    raw.trim()
        .parse::<i64>()
        .map(OrderId::new)
        .map_err(|_| Error::not_found("Order not found"))
}

/// Treat blank optional strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
