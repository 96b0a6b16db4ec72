//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from
//! `eventhub_core::storage`. The original driver error is kept as the source.

use eventhub_core::storage::StoreError;

/// Maps a rusqlite error to a StoreError.
///
/// # Error Mapping
///
/// - `SQLITE_CANTOPEN` → `StoreError::StorageUnavailable`
/// - `QueryReturnedNoRows` → `StoreError::NotFound` when an id is known
/// - Row conversion failures → `StoreError::InvalidData`
/// - All other errors → `StoreError::Storage`
fn map_rusqlite_error(err: rusqlite::Error, context: &str, id: Option<&str>) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            StoreError::unavailable(format!("{context}: cannot open database"), Some(err.into()))
        }

        rusqlite::Error::QueryReturnedNoRows if id.is_some() => {
            StoreError::not_found(id.unwrap_or_default())
        }

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..) => {
            StoreError::InvalidData(format!("{context}: {err}"))
        }

        _ => StoreError::storage(context.to_string(), err),
    }
}

/// Maps a tokio_rusqlite error to a StoreError.
///
/// This is the main entry point for error mapping in async code.
/// It extracts the inner `rusqlite::Error` if present, otherwise
/// keeps the whole error as the source of a storage fault.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, context: &str) -> StoreError {
    match err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, context, None)
        }
        tokio_rusqlite::Error::ConnectionClosed => StoreError::unavailable(
            format!("{context}: connection closed unexpectedly"),
            None,
        ),
        other => StoreError::storage(context.to_string(), other),
    }
}

/// Maps a tokio_rusqlite error with a known event id to a StoreError.
///
/// Use this variant when the event id is known at the call site, so that
/// missing rows surface as `StoreError::NotFound`.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    context: &str,
    id: &str,
) -> StoreError {
    match err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, context, Some(id))
        }
        other => map_tokio_rusqlite_error(other, context),
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use rusqlite::ffi;

    #[test]
    fn test_cannot_open_maps_to_unavailable() {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::CannotOpen,
            extended_code: ffi::SQLITE_CANTOPEN,
        };
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None));

        let result = map_tokio_rusqlite_error(err, "open events.db");

        assert!(matches!(result, StoreError::StorageUnavailable { .. }));
        assert!(result.source().is_some());
    }

    #[test]
    fn test_no_rows_with_id_maps_to_not_found() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error_with_id(err, "toggle favorite", "evt_001");

        match result {
            StoreError::NotFound { id } => assert_eq!(id, "evt_001"),
            other => panic!("Expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_rows_without_id_is_a_storage_error() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error(err, "count events");

        assert!(matches!(result, StoreError::Storage { .. }));
    }

    #[test]
    fn test_conversion_failure_maps_to_invalid_data() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::IntegralValueOutOfRange(13, -1));

        let result = map_tokio_rusqlite_error(err, "read event");

        assert!(matches!(result, StoreError::InvalidData(_)));
    }

    #[test]
    fn test_connection_closed_maps_to_unavailable() {
        let result = map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "query");

        assert!(matches!(result, StoreError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_other_error_keeps_source() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("disk I/O")));

        let result = map_tokio_rusqlite_error(err, "upsert events");

        assert!(matches!(result, StoreError::Storage { .. }));
        assert_eq!(result.to_string(), "Storage error: upsert events");
        assert!(result.source().is_some());
    }
}
