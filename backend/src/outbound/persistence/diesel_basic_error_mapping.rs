//! Shared Diesel error mapping for the gallery repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// Constraint violations the caller cares about (unique keys on user
/// creation) are checked with [`is_unique_violation`] before falling back
/// here.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        _ => query("database error"),
    }
}

/// Whether the failure is a unique or primary key violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[test]
    fn not_found_is_a_query_error() {
        let mapped = map_basic_diesel_error(DieselError::NotFound, Mapped::Query, |m| {
            Mapped::Connection(m.to_owned())
        });
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[test]
    fn pool_errors_become_connection_errors() {
        let mapped: Mapped =
            map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[test]
    fn not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
