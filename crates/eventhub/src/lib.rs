//! eventhub - local cache-and-fallback data layer for the event catalog.
//!
//! The remote catalog is always tried first. Its results are written through
//! to a local SQLite cache, which answers instead whenever the remote fails.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod repository;
pub mod storage;
pub mod sync;

pub use config::{Config, ConfigError};
pub use context::AppContext;
pub use error::InitError;
pub use repository::CacheRepository;
pub use sync::SyncOrchestrator;
