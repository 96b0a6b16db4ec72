//! eventhub_client - HTTP client for the eventhub remote catalog API.

pub mod client;
pub mod error;

pub use client::{EventHubClient, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
