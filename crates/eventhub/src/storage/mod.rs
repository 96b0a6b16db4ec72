//! Storage backend implementations.
//!
//! Concrete implementations of the `EventStore` trait defined in
//! `eventhub_core::storage`:
//!
//! - [`sqlite`]: durable store on `rusqlite` and `tokio-rusqlite`
//! - [`inmemory`]: HashMap-backed store with the same semantics

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryEventStore;
pub use sqlite::{SqliteEventStore, StoreLocation};
