//! Diesel and pool error mapping for the user repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors by the step that failed.
///
/// Query-builder and bind failures happen before the statement reaches the
/// server and count as preparation failures; row decoding failures count
/// as scan failures.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::QueryBuilderError(err) | DieselError::SerializationError(err) => {
            UserPersistenceError::prepare(err.to_string())
        }
        DieselError::DeserializationError(err) => UserPersistenceError::scan(err.to_string()),
        DieselError::NotFound => UserPersistenceError::scan("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            UserPersistenceError::execute(info.message().to_owned())
        }
        other => UserPersistenceError::execute(other.to_string()),
    }
}
