//! Result shapes and pure helpers for the remote-then-cache sync flow.

mod enrich;
mod error;
mod types;

pub use enrich::{enrich_one, enrich_with_favorites, event_ids};
pub use error::{Result, SyncError};
pub use types::{CatalogResponse, DataSource, DetailResponse};
