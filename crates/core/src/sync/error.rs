use thiserror::Error;

use crate::storage::StoreError;

/// Errors surfaced by the sync orchestrator to its caller.
///
/// Remote failures never appear here: they are absorbed by the cache
/// fallback.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Neither the remote nor the cache holds this event.
    #[error("Event not found: {id}")]
    EventNotFound { id: String },
    /// A favorite toggle targeted an event that was never cached.
    #[error("Cannot favorite uncached event: {id}")]
    NotFound { id: String },
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_not_found_display() {
        let error = SyncError::EventNotFound {
            id: "evt_404".to_string(),
        };
        assert_eq!(error.to_string(), "Event not found: evt_404");
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let error = SyncError::from(StoreError::NotInitialized);
        assert_eq!(error.to_string(), "Event store used before initialization");
    }
}
