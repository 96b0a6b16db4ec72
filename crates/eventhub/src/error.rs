//! Startup errors of the eventhub application.

use thiserror::Error;

use eventhub_client::ClientError;
use eventhub_core::storage::StoreError;

/// Failures that prevent the application context from starting.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Event store error: {0}")]
    Store(#[from] StoreError),

    #[error("Remote client error: {0}")]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = InitError::from(StoreError::unavailable("cannot open events.db", None));

        assert_eq!(
            error.to_string(),
            "Event store error: Storage unavailable: cannot open events.db"
        );
    }
}
