use thiserror::Error;

/// Opaque failure of the remote catalog API.
///
/// Every variant triggers the cache fallback in the sync orchestrator; the
/// distinction only matters for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Remote unavailable: {0}")]
    Unavailable(String),
    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Remote event not found: {id}")]
    NotFound { id: String },
    #[error("Invalid remote response: {0}")]
    InvalidResponse(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let error = RemoteError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(error.to_string(), "Remote returned 503: maintenance");
    }

    #[test]
    fn test_not_found_display() {
        let error = RemoteError::NotFound {
            id: "evt_999".to_string(),
        };
        assert_eq!(error.to_string(), "Remote event not found: evt_999");
    }
}
