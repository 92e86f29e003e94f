//! Shared error mapping for Diesel repository implementations.
//!
//! Repositories pass their port error constructors in, so each adapter keeps
//! its own error enum while the classification of Diesel failures lives in
//! one place. Messages are kept verbatim; the HTTP layer echoes them.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure into a repository-specific connection error.
pub fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure into query or connection constructors.
///
/// `operation` names the repository call in the debug event.
pub fn map_diesel_error<E>(
    error: DieselError,
    operation: &str,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    let message = error.to_string();
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection(message),
        _ => query(message),
    }
}

/// Whether the error is a unique-constraint violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%needle%` pattern for substring matching.
pub fn contains_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".into()));
    }

    #[rstest]
    fn not_found_is_a_query_error_with_the_diesel_message() {
        let mapped = map_diesel_error(
            DieselError::NotFound,
            "find",
            Mapped::Query,
            Mapped::Connection,
        );
        assert_eq!(mapped, Mapped::Query(DieselError::NotFound.to_string()));
    }

    #[rstest]
    fn broken_transaction_manager_is_a_connection_error() {
        let mapped = map_diesel_error(
            DieselError::BrokenTransactionManager,
            "create",
            Mapped::Query,
            Mapped::Connection,
        );
        assert!(matches!(mapped, Mapped::Connection(_)));
    }

    #[rstest]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\dir", "%c:\\\\dir%")]
    #[case("plain", "%plain%")]
    fn like_patterns_escape_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }

    #[rstest]
    fn only_unique_violations_are_flagged() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
