//! Mapping from pool and Diesel failures into [`DirectoryError`].

use tracing::debug;

use crate::domain::ports::DirectoryError;

use super::pool::PoolError;

impl From<PoolError> for DirectoryError {
    fn from(error: PoolError) -> Self {
        let message = match error {
            PoolError::Checkout { message } | PoolError::Build { message } => message,
        };
        DirectoryError::connection(message)
    }
}

/// Map a Diesel error raised during `operation` into a directory error.
///
/// Closed connections surface as connection failures; everything else is a
/// query failure carrying Diesel's message.
pub(super) fn map_diesel_error(error: diesel::result::Error, operation: &str) -> DirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DirectoryError::connection(info.message().to_owned())
        }
        other => DirectoryError::query(format!("{operation}: {other}")),
    }
}
