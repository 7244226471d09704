//! Shared Diesel error mapping for repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// `true` when `error` reports a UNIQUE constraint violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Driver messages are logged at debug level and replaced with fixed text so
/// SQL details never reach callers.
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(String::from("driver detail")))
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::ClosedConnection)),
            Mapped::Connection("database connection error")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::Unknown), "database error")]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation),
        "unique constraint violated"
    )]
    fn other_failures_map_to_query(#[case] error: DieselError, #[case] expected: &'static str) {
        assert_eq!(map(error), Mapped::Query(expected));
    }

    #[rstest]
    fn detects_unique_violation() {
        assert!(is_unique_violation(&database_error(
            DatabaseErrorKind::UniqueViolation
        )));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn pool_errors_keep_message() {
        let mapped: String = map_basic_pool_error(PoolError::checkout("timed out"), |m| m);
        assert_eq!(mapped, "timed out");
    }
}
