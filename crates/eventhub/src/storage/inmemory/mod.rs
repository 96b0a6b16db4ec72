//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of `EventStore` that
//! keeps every row in a HashMap wrapped in `Arc<RwLock<_>>`. Useful for tests
//! and for running the CLI without touching the filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventhub::storage::inmemory::InMemoryEventStore;
//!
//! let store = InMemoryEventStore::new();
//! store.initialize().await?;
//! ```

mod repository;

pub use repository::InMemoryEventStore;
