use thiserror::Error;

/// Boxed underlying cause of a storage fault.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during event store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    #[error("Event store used before initialization")]
    NotInitialized,
    #[error("Event not found: {id}")]
    NotFound { id: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    /// Wraps an underlying I/O or driver fault, keeping it as the error source.
    pub fn storage(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::Storage {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The medium backing the store could not be opened.
    pub fn unavailable(message: impl Into<String>, source: Option<BoxError>) -> Self {
        StoreError::StorageUnavailable {
            message: message.into(),
            source,
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
