//! In-memory event store implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use eventhub_core::catalog::{
    matches_query, paginate, EventDetail, EventPage, EventQuery, EventRecord, EventSummary,
};
use eventhub_core::storage::{is_evictable, EventStore, Result, StoreError};

#[derive(Debug, Default)]
struct State {
    initialized: bool,
    events: HashMap<String, EventRecord>,
}

impl State {
    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    fn sorted_records<'a>(
        &'a self,
        filter: impl Fn(&EventRecord) -> bool,
    ) -> Vec<&'a EventRecord> {
        let mut records: Vec<&EventRecord> =
            self.events.values().filter(|record| filter(record)).collect();
        records.sort_by(|a, b| {
            b.cached_at
                .cmp(&a.cached_at)
                .then_with(|| a.summary.id.cmp(&b.summary.id))
        });
        records
    }
}

/// Rows without an identifier are rejected before anything is written.
fn ensure_ids<'a>(mut ids: impl Iterator<Item = &'a str>) -> Result<()> {
    if ids.any(str::is_empty) {
        return Err(StoreError::InvalidData("event without id".to_string()));
    }
    Ok(())
}

/// In-memory event store.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access. A single
/// write lock serializes every mutation. Data is lost when the store is closed
/// or dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryEventStore {
    /// Creates a new, uninitialized in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn initialize(&self) -> Result<()> {
        self.state.write().await.initialized = true;
        Ok(())
    }

    async fn upsert_many(&self, events: &[EventSummary], cached_at: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;
        ensure_ids(events.iter().map(|event| event.id.as_str()))?;

        for event in events {
            state
                .events
                .entry(event.id.clone())
                .and_modify(|record| {
                    record.summary = event.clone();
                    record.cached_at = cached_at;
                })
                .or_insert_with(|| EventRecord {
                    summary: event.clone(),
                    details: None,
                    is_favorite: false,
                    cached_at,
                });
        }
        Ok(())
    }

    async fn upsert_detail(&self, event: &EventDetail, cached_at: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;
        ensure_ids(std::iter::once(event.summary.id.as_str()))?;

        let is_favorite = state
            .events
            .get(&event.summary.id)
            .is_some_and(|record| record.is_favorite);
        state.events.insert(
            event.summary.id.clone(),
            EventRecord {
                summary: event.summary.clone(),
                details: Some(event.fields.clone()),
                is_favorite,
                cached_at,
            },
        );
        Ok(())
    }

    async fn query(&self, query: &EventQuery) -> Result<EventPage<EventRecord>> {
        let state = self.state.read().await;
        state.ensure_initialized()?;

        let records: Vec<EventRecord> = state
            .sorted_records(|record| matches_query(&record.summary, query))
            .into_iter()
            .cloned()
            .collect();
        Ok(paginate(&records, query))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<EventRecord>> {
        let state = self.state.read().await;
        state.ensure_initialized()?;
        Ok(state.events.get(id).cloned())
    }

    async fn query_favorites(&self) -> Result<Vec<EventRecord>> {
        let state = self.state.read().await;
        state.ensure_initialized()?;
        Ok(state
            .sorted_records(|record| record.is_favorite)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn favorite_ids(&self, ids: &[String]) -> Result<HashSet<String>> {
        let state = self.state.read().await;
        state.ensure_initialized()?;
        Ok(ids
            .iter()
            .filter(|id| state.events.get(*id).is_some_and(|r| r.is_favorite))
            .cloned()
            .collect())
    }

    async fn set_favorite(&self, id: &str, value: bool) -> Result<bool> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;

        let record = state
            .events
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        record.is_favorite = value;
        Ok(value)
    }

    async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;

        let record = state
            .events
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        record.is_favorite = !record.is_favorite;
        Ok(record.is_favorite)
    }

    async fn evict_stale(&self, now: DateTime<Utc>, max_age: Duration) -> Result<usize> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;

        let before = state.events.len();
        state
            .events
            .retain(|_, record| !is_evictable(record.cached_at, record.is_favorite, now, max_age));
        Ok(before - state.events.len())
    }

    async fn clear_all(&self) -> Result<usize> {
        let mut state = self.state.write().await;
        state.ensure_initialized()?;

        let removed = state.events.len();
        state.events.clear();
        Ok(removed)
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.initialized = false;
        state.events.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use eventhub_core::catalog::{Category, CategoryFilter, DetailFields};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn summary(id: &str, title: &str, category: Category, price: u32) -> EventSummary {
        EventSummary {
            id: id.to_string(),
            title: title.to_string(),
            category,
            starts_at: Utc.with_ymd_and_hms(2025, 5, 20, 19, 30, 0).unwrap(),
            city: "Lisbon".to_string(),
            price,
            thumbnail: String::new(),
        }
    }

    async fn store() -> InMemoryEventStore {
        let store = InMemoryEventStore::new();
        store.initialize().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_requires_initialize() {
        let store = InMemoryEventStore::new();

        assert!(matches!(
            store.query(&EventQuery::new(1)).await,
            Err(StoreError::NotInitialized)
        ));

        store.initialize().await.unwrap();
        store.close().await.unwrap();

        assert!(matches!(
            store.toggle_favorite("evt_1").await,
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_upserts_preserve_favorite_flag() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 100)], at(0))
            .await
            .unwrap();
        store.set_favorite("evt_1", true).await.unwrap();

        store
            .upsert_detail(
                &EventDetail {
                    summary: summary("evt_1", "A", Category::Tech, 150),
                    fields: DetailFields::default(),
                },
                at(1),
            )
            .await
            .unwrap();
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 200)], at(2))
            .await
            .unwrap();

        let record = store.get_by_id("evt_1").await.unwrap().unwrap();
        assert!(record.is_favorite);
        assert_eq!(record.summary.price, 200);
        assert!(record.details.is_some());
        assert!(store.is_favorite("evt_1").await.unwrap());
        assert!(!store.is_favorite("evt_2").await.unwrap());
    }

    #[tokio::test]
    async fn test_query_orders_and_paginates() {
        let store = store().await;
        store
            .upsert_many(
                &[
                    summary("evt_b", "Jazz Night", Category::Arts, 0),
                    summary("evt_a", "Startup Pitch", Category::Business, 0),
                ],
                at(0),
            )
            .await
            .unwrap();
        store
            .upsert_many(&[summary("evt_c", "jazz brunch", Category::Arts, 0)], at(1))
            .await
            .unwrap();

        let all = store.query(&EventQuery::new(1)).await.unwrap();
        let ids: Vec<_> = all.events.iter().map(|r| r.summary.id.as_str()).collect();
        assert_eq!(ids, vec!["evt_c", "evt_a", "evt_b"]);

        let arts = store
            .query(
                &EventQuery::new(1)
                    .with_page_size(1)
                    .with_category(CategoryFilter::Only(Category::Arts))
                    .with_search("JAZZ"),
            )
            .await
            .unwrap();
        assert_eq!(arts.total_count, 2);
        assert!(arts.has_more);
        assert_eq!(arts.events[0].summary.id, "evt_c");
    }

    #[tokio::test]
    async fn test_evict_stale_spares_favorites() {
        let store = store().await;
        let now = at(0) + Duration::days(10);
        store
            .upsert_many(
                &[
                    summary("evt_old", "A", Category::Tech, 0),
                    summary("evt_fav", "B", Category::Tech, 0),
                ],
                at(0),
            )
            .await
            .unwrap();
        store
            .upsert_many(&[summary("evt_new", "C", Category::Tech, 0)], now)
            .await
            .unwrap();
        store.set_favorite("evt_fav", true).await.unwrap();

        let removed = store.evict_stale(now, Duration::days(7)).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get_by_id("evt_old").await.unwrap().is_none());
        assert!(store.get_by_id("evt_fav").await.unwrap().is_some());
        assert!(store.get_by_id("evt_new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_not_found() {
        let store = store().await;

        let result = store.toggle_favorite("evt_404").await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_favorites_and_clear_all() {
        let store = store().await;
        store
            .upsert_many(
                &[
                    summary("evt_1", "A", Category::Tech, 0),
                    summary("evt_2", "B", Category::Tech, 0),
                ],
                at(0),
            )
            .await
            .unwrap();
        assert!(store.toggle_favorite("evt_2").await.unwrap());

        let favorites = store.query_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].summary.id, "evt_2");

        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert!(store.query_favorites().await.unwrap().is_empty());
    }
}
