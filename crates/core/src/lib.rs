//! Core domain for the eventhub catalog cache.
//!
//! Pure types, traits and functions shared by the storage backends, the
//! remote client and the sync orchestrator. Nothing in this crate performs I/O.

pub mod catalog;
pub mod remote;
pub mod storage;
pub mod sync;
