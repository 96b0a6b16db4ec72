//! Client error types.

use eventhub_core::catalog::CheckoutError;
use eventhub_core::remote::RemoteError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] CheckoutError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_decode() => RemoteError::InvalidResponse(e.to_string()),
            ClientError::Request(e) => RemoteError::Unavailable(e.to_string()),
            ClientError::ServerError { status, message } => RemoteError::Status { status, message },
            ClientError::NotFound { resource } => RemoteError::NotFound { id: resource },
            ClientError::InvalidResponse(message) => RemoteError::InvalidResponse(message),
            ClientError::InvalidInput(e) => RemoteError::Rejected(e.to_string()),
            ClientError::Json(e) => RemoteError::InvalidResponse(e.to_string()),
        }
    }
}
