//! Cache repository façade over an `EventStore`.
//!
//! The cache is a best-effort accelerator: storage faults on reads and
//! write-through are logged and turned into empty results so callers are
//! never blocked by the cache. Only favorite mutations report errors, since
//! a failed toggle must be visible to the user.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};

use eventhub_core::catalog::{EventDetail, EventPage, EventQuery, EventRecord, EventSummary};
use eventhub_core::storage::{EventStore, Result};

/// Typed access to the local event cache.
#[derive(Clone)]
pub struct CacheRepository {
    store: Arc<dyn EventStore>,
}

impl CacheRepository {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Initializes the underlying store. Errors propagate so startup can fail.
    pub async fn initialize(&self) -> Result<()> {
        self.store.initialize().await
    }

    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }

    /// Writes a catalog page through to the store. Returns whether it was persisted.
    pub async fn upsert_many(&self, events: &[EventSummary]) -> bool {
        match self.store.upsert_many(events, Utc::now()).await {
            Ok(()) => {
                tracing::debug!(count = events.len(), "Cached catalog page");
                true
            }
            Err(err) => {
                tracing::error!(count = events.len(), error = %err, "Failed to cache catalog page");
                false
            }
        }
    }

    /// Writes an event detail through to the store. Returns whether it was persisted.
    pub async fn upsert_detail(&self, event: &EventDetail) -> bool {
        match self.store.upsert_detail(event, Utc::now()).await {
            Ok(()) => {
                tracing::debug!(event_id = %event.summary.id, "Cached event detail");
                true
            }
            Err(err) => {
                tracing::error!(event_id = %event.summary.id, error = %err, "Failed to cache event detail");
                false
            }
        }
    }

    /// Reads a catalog page from the cache. Storage faults yield an empty page.
    pub async fn query(&self, query: &EventQuery) -> EventPage<EventRecord> {
        match self.store.query(query).await {
            Ok(page) => {
                tracing::trace!(
                    page = query.page,
                    count = page.events.len(),
                    total = page.total_count,
                    "Cache query"
                );
                page
            }
            Err(err) => {
                tracing::error!(page = query.page, error = %err, "Cache query failed");
                EventPage::empty(query.page)
            }
        }
    }

    /// Looks up a cached event. A missing id and a storage fault both yield `None`.
    pub async fn get_by_id(&self, id: &str) -> Option<EventRecord> {
        match self.store.get_by_id(id).await {
            Ok(Some(record)) => {
                tracing::trace!(event_id = %id, "Cache hit for event");
                Some(record)
            }
            Ok(None) => {
                tracing::trace!(event_id = %id, "Cache miss for event");
                None
            }
            Err(err) => {
                tracing::error!(event_id = %id, error = %err, "Cache lookup failed");
                None
            }
        }
    }

    /// Favorited events, most recently cached first.
    pub async fn favorites(&self) -> Vec<EventRecord> {
        self.store.query_favorites().await.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Failed to read favorites");
            Vec::new()
        })
    }

    /// The favorited subset of `ids`. Storage faults yield an empty set.
    pub async fn favorite_ids(&self, ids: &[String]) -> HashSet<String> {
        self.store.favorite_ids(ids).await.unwrap_or_else(|err| {
            tracing::error!(count = ids.len(), error = %err, "Failed to read favorite flags");
            HashSet::new()
        })
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.store.is_favorite(id).await.unwrap_or_else(|err| {
            tracing::error!(event_id = %id, error = %err, "Failed to read favorite flag");
            false
        })
    }

    /// Sets the favorite flag of a cached event.
    pub async fn set_favorite(&self, id: &str, value: bool) -> Result<bool> {
        self.store.set_favorite(id, value).await
    }

    /// Flips the favorite flag of a cached event and returns the new value.
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        self.store.toggle_favorite(id).await
    }

    /// Removes non-favorited events older than `max_age`. Returns the number removed.
    pub async fn evict_stale(&self, max_age: Duration) -> usize {
        match self.store.evict_stale(Utc::now(), max_age).await {
            Ok(removed) => {
                tracing::info!(removed, max_age_hours = max_age.num_hours(), "Evicted stale events");
                removed
            }
            Err(err) => {
                tracing::error!(error = %err, "Stale eviction failed");
                0
            }
        }
    }

    /// Removes every cached event, favorites included. Returns the number removed.
    pub async fn clear_all(&self) -> usize {
        match self.store.clear_all().await {
            Ok(removed) => {
                tracing::info!(removed, "Cleared event cache");
                removed
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to clear event cache");
                0
            }
        }
    }
}
