use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::catalog::{EventDetail, EventPage, EventQuery, EventRecord, EventSummary};

use super::Result;

/// Durable storage for cached catalog events, one row per event id.
///
/// Every operation other than `initialize` fails with
/// [`StoreError::NotInitialized`](super::StoreError::NotInitialized) until
/// `initialize` has succeeded, and again after `close`.
///
/// Write operations never change the favorite flag of an existing row unless
/// they are one of the explicit favorite operations.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Creates the schema if absent. Safe to call repeatedly.
    async fn initialize(&self) -> Result<()>;

    /// Upserts a catalog page atomically, stamping every row with `cached_at`.
    async fn upsert_many(&self, events: &[EventSummary], cached_at: DateTime<Utc>) -> Result<()>;

    /// Upserts a single event including its detail fields.
    async fn upsert_detail(&self, event: &EventDetail, cached_at: DateTime<Utc>) -> Result<()>;

    /// Filtered, paginated read ordered by most recently cached first.
    async fn query(&self, query: &EventQuery) -> Result<EventPage<EventRecord>>;

    /// Gets an event by its id.
    async fn get_by_id(&self, id: &str) -> Result<Option<EventRecord>>;

    /// All favorited events, most recently cached first.
    async fn query_favorites(&self) -> Result<Vec<EventRecord>>;

    /// Returns the subset of `ids` that are favorited.
    async fn favorite_ids(&self, ids: &[String]) -> Result<HashSet<String>>;

    /// Whether a single event is favorited. Unknown ids are not.
    async fn is_favorite(&self, id: &str) -> Result<bool> {
        let favorites = self.favorite_ids(&[id.to_string()]).await?;
        Ok(favorites.contains(id))
    }

    /// Sets the favorite flag and returns the stored value.
    async fn set_favorite(&self, id: &str, value: bool) -> Result<bool>;

    /// Inverts the favorite flag in a single read-flip-write step and returns
    /// the new value.
    async fn toggle_favorite(&self, id: &str) -> Result<bool>;

    /// Deletes non-favorited rows cached more than `max_age` before `now`.
    /// Returns the number of rows removed.
    async fn evict_stale(&self, now: DateTime<Utc>, max_age: Duration) -> Result<usize>;

    /// Deletes every row. Returns the number of rows removed.
    async fn clear_all(&self) -> Result<usize>;

    /// Releases the underlying medium. The store must be initialized again
    /// before further use.
    async fn close(&self) -> Result<()>;
}
