//! SQLite event store implementation.
//!
//! Implements `EventStore` from `eventhub_core::storage` using SQLite.
//! All statements run on the single background thread owned by the
//! `tokio_rusqlite::Connection`, so writes are serialized without extra locks.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter};
use tokio::sync::RwLock;
use tokio_rusqlite::Connection;

use eventhub_core::catalog::{
    search_key, EventDetail, EventPage, EventQuery, EventRecord, EventSummary,
};
use eventhub_core::storage::{stale_cutoff, EventStore, Result, StoreError};

use super::conversions::{
    build_filter, format_datetime, format_timestamp, placeholders, row_to_record,
    speakers_to_json,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    /// Interprets `:memory:` as an in-memory database and anything else as a file path.
    pub fn from_path(path: &str) -> Self {
        if path == ":memory:" {
            StoreLocation::Memory
        } else {
            StoreLocation::File(PathBuf::from(path))
        }
    }
}

/// Listing fields of one event, owned so they can move into a connection closure.
struct SummaryParams {
    id: String,
    title: String,
    title_search: String,
    category: &'static str,
    starts_at: String,
    city: String,
    price: u32,
    thumbnail: String,
}

impl SummaryParams {
    fn from_summary(event: &EventSummary) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            title_search: search_key(&event.title),
            category: event.category.as_str(),
            starts_at: format_datetime(&event.starts_at),
            city: event.city.clone(),
            price: event.price,
            thumbnail: event.thumbnail.clone(),
        }
    }
}

/// SQLite-based event store.
///
/// The connection is opened by `initialize` and dropped by `close`; every
/// other operation fails with `StoreError::NotInitialized` while it is absent.
pub struct SqliteEventStore {
    location: StoreLocation,
    conn: RwLock<Option<Connection>>,
}

impl SqliteEventStore {
    /// Creates an uninitialized store backed by a database file.
    ///
    /// The file is created on `initialize` if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_location(StoreLocation::File(path.into()))
    }

    /// Creates an uninitialized store backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the store is closed.
    pub fn new_in_memory() -> Self {
        Self::with_location(StoreLocation::Memory)
    }

    pub fn with_location(location: StoreLocation) -> Self {
        Self {
            location,
            conn: RwLock::new(None),
        }
    }

    /// Opens and initializes a store in one step.
    pub async fn open(location: StoreLocation) -> Result<Self> {
        let store = Self::with_location(location);
        store.initialize().await?;
        Ok(store)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    async fn connect(&self) -> Result<Connection> {
        let opened = match &self.location {
            StoreLocation::File(path) => Connection::open(path).await,
            StoreLocation::Memory => Connection::open_in_memory().await,
        };
        opened.map_err(|e| {
            StoreError::unavailable(
                format!("failed to open database {:?}", self.location),
                Some(Box::new(e)),
            )
        })
    }

    /// Returns a handle to the open connection.
    async fn conn(&self) -> Result<Connection> {
        self.conn
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotInitialized)
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "create events schema"))
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn initialize(&self) -> Result<()> {
        let mut guard = self.conn.write().await;

        if let Some(conn) = guard.as_ref() {
            return Self::init_schema(conn).await;
        }

        let conn = self.connect().await?;
        Self::init_schema(&conn).await?;
        *guard = Some(conn);

        tracing::info!(location = ?self.location, "Event store initialized");
        Ok(())
    }

    async fn upsert_many(&self, events: &[EventSummary], cached_at: DateTime<Utc>) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let rows: Vec<SummaryParams> = events.iter().map(SummaryParams::from_summary).collect();
        let count = rows.len();
        let cached_at = format_timestamp(&cached_at);

        self.conn()
            .await?
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare_cached(schema::UPSERT_SUMMARY).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(params![
                            row.id,
                            row.title,
                            row.category,
                            row.starts_at,
                            row.city,
                            row.price,
                            row.thumbnail,
                            cached_at,
                            row.title_search
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "upsert events"))?;

        tracing::debug!(count, "Upserted event summaries");
        Ok(())
    }

    async fn upsert_detail(&self, event: &EventDetail, cached_at: DateTime<Utc>) -> Result<()> {
        let summary = SummaryParams::from_summary(&event.summary);
        let description = event.fields.description.clone();
        let venue = event.fields.venue.clone();
        let speakers = speakers_to_json(&event.fields.speakers)?;
        let capacity = event.fields.capacity;
        let remaining = event.fields.remaining;
        let cached_at = format_timestamp(&cached_at);
        let event_id = event.summary.id.clone();

        self.conn()
            .await?
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_DETAIL,
                    params![
                        summary.id,
                        summary.title,
                        summary.category,
                        summary.starts_at,
                        summary.city,
                        summary.price,
                        summary.thumbnail,
                        description,
                        venue,
                        speakers,
                        capacity,
                        remaining,
                        cached_at,
                        summary.title_search
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "upsert event detail", &event_id))?;

        tracing::debug!(event_id = %event_id, "Upserted event detail");
        Ok(())
    }

    async fn query(&self, query: &EventQuery) -> Result<EventPage<EventRecord>> {
        let (clause, filter_params) = build_filter(query);
        let count_sql = format!("SELECT COUNT(*) FROM events WHERE {clause}");
        let select_sql = format!(
            "SELECT {} FROM events WHERE {clause} {} LIMIT ? OFFSET ?",
            schema::EVENT_COLUMNS,
            schema::ORDER_BY_RECENT
        );
        let limit = i64::try_from(query.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);

        let (records, total) = self
            .conn()
            .await?
            .call(move |conn| {
                let total: i64 = conn
                    .query_row(&count_sql, params_from_iter(filter_params.iter()), |row| {
                        row.get(0)
                    })
                    .map_err(wrap_err)?;

                let mut select_params = filter_params;
                select_params.push(Value::Integer(limit));
                select_params.push(Value::Integer(offset));

                let mut stmt = conn.prepare(&select_sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(params_from_iter(select_params.iter()), row_to_record)
                    .map_err(wrap_err)?;

                let mut records = Vec::new();
                for row_result in rows {
                    records.push(row_result.map_err(wrap_err)?);
                }
                Ok((records, total))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "query events"))?;

        let total_count = u64::try_from(total).unwrap_or_default();
        Ok(EventPage::from_total(records, total_count, query))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<EventRecord>> {
        let id_str = id.to_string();

        self.conn()
            .await?
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EVENT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_record) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "get event", id))
    }

    async fn query_favorites(&self) -> Result<Vec<EventRecord>> {
        self.conn()
            .await?
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_FAVORITES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_record).map_err(wrap_err)?;

                let mut records = Vec::new();
                for row_result in rows {
                    records.push(row_result.map_err(wrap_err)?);
                }
                Ok(records)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "query favorite events"))
    }

    async fn favorite_ids(&self, ids: &[String]) -> Result<HashSet<String>> {
        let conn = self.conn().await?;
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let sql = format!(
            "SELECT id FROM events WHERE is_favorite = 1 AND id IN ({})",
            placeholders(ids.len())
        );
        let ids = ids.to_vec();

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            let rows = stmt
                .query_map(params_from_iter(ids.iter()), |row| row.get::<_, String>(0))
                .map_err(wrap_err)?;

            let mut favorites = HashSet::new();
            for row_result in rows {
                favorites.insert(row_result.map_err(wrap_err)?);
            }
            Ok(favorites)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "look up favorite flags"))
    }

    async fn set_favorite(&self, id: &str, value: bool) -> Result<bool> {
        let id_str = id.to_string();

        self.conn()
            .await?
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_FAVORITE, params![id_str, value])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(value)
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "set favorite", id))
    }

    async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        let id_str = id.to_string();

        let new_value = self
            .conn()
            .await?
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let current: bool = tx
                    .query_row(schema::SELECT_FAVORITE_FLAG, [&id_str], |row| row.get(0))
                    .map_err(wrap_err)?;
                let new_value = !current;
                tx.execute(schema::UPDATE_FAVORITE, params![id_str, new_value])
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(new_value)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "toggle favorite", id))?;

        tracing::debug!(event_id = %id, is_favorite = new_value, "Favorite toggled");
        Ok(new_value)
    }

    async fn evict_stale(&self, now: DateTime<Utc>, max_age: Duration) -> Result<usize> {
        let cutoff = format_timestamp(&stale_cutoff(now, max_age));

        let removed = self
            .conn()
            .await?
            .call(move |conn| {
                conn.execute(schema::DELETE_STALE, [cutoff])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "evict stale events"))?;

        tracing::debug!(removed, "Evicted stale events");
        Ok(removed)
    }

    async fn clear_all(&self) -> Result<usize> {
        self.conn()
            .await?
            .call(|conn| conn.execute(schema::DELETE_ALL, []).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "clear events"))
    }

    async fn close(&self) -> Result<()> {
        let Some(conn) = self.conn.write().await.take() else {
            return Ok(());
        };

        conn.close()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "close event store"))?;

        tracing::info!(location = ?self.location, "Event store closed");
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
            city: "Porto".to_string(),
            price,
            thumbnail: format!("https://img.example.com/{id}.png"),
        }
    }

    fn detail(id: &str, capacity: u32, remaining: u32) -> EventDetail {
        EventDetail {
            summary: summary(id, "Rust Conf", Category::Tech, 9900),
            fields: DetailFields {
                description: "Two days of Rust".to_string(),
                venue: "Tech Center, Porto".to_string(),
                speakers: vec!["Ferris".to_string(), "Corro".to_string()],
                capacity,
                remaining,
            },
        }
    }

    async fn store() -> SqliteEventStore {
        SqliteEventStore::open(StoreLocation::Memory).await.unwrap()
    }

    #[tokio::test]
    async fn test_operations_before_initialize_fail() {
        let store = SqliteEventStore::new_in_memory();

        assert!(matches!(
            store.get_by_id("evt_1").await,
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.upsert_many(&[summary("evt_1", "A", Category::Tech, 0)], at(0)).await,
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.evict_stale(at(0), Duration::days(7)).await,
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 0)], at(0))
            .await
            .unwrap();

        store.initialize().await.unwrap();

        assert!(store.get_by_id("evt_1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_operations_after_close_fail() {
        let store = store().await;

        store.close().await.unwrap();

        assert!(matches!(
            store.query_favorites().await,
            Err(StoreError::NotInitialized)
        ));
        // Closing twice is harmless
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_unopenable_path_is_unavailable() {
        let store = SqliteEventStore::new("/nonexistent-dir/eventhub/events.db");

        let result = store.initialize().await;

        assert!(matches!(result, Err(StoreError::StorageUnavailable { .. })));
        assert!(matches!(
            store.get_by_id("evt_1").await,
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_upsert_many_inserts_with_favorite_false() {
        let store = store().await;

        store
            .upsert_many(
                &[
                    summary("evt_1", "Rust Meetup", Category::Tech, 0),
                    summary("evt_2", "Gallery Night", Category::Arts, 1500),
                ],
                at(0),
            )
            .await
            .unwrap();

        let record = store.get_by_id("evt_2").await.unwrap().unwrap();
        assert_eq!(record.summary.title, "Gallery Night");
        assert_eq!(record.summary.price, 1500);
        assert!(!record.is_favorite);
        assert_eq!(record.details, None);
        assert_eq!(record.cached_at, at(0));
    }

    #[tokio::test]
    async fn test_idempotent_upsert_keeps_one_row_with_latest_values() {
        let store = store().await;

        store
            .upsert_many(&[summary("evt_1", "Rust Meetup", Category::Tech, 1000)], at(0))
            .await
            .unwrap();
        store
            .upsert_many(&[summary("evt_1", "Rust Meetup v2", Category::Tech, 1200)], at(5))
            .await
            .unwrap();

        let page = store.query(&EventQuery::new(1)).await.unwrap();
        assert_eq!(page.total_count, 1);
        let record = &page.events[0];
        assert_eq!(record.summary.title, "Rust Meetup v2");
        assert_eq!(record.summary.price, 1200);
        assert_eq!(record.cached_at, at(5));
    }

    #[tokio::test]
    async fn test_upserts_preserve_favorite_flag() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_1", "Rust Meetup", Category::Tech, 1000)], at(0))
            .await
            .unwrap();
        store.set_favorite("evt_1", true).await.unwrap();

        store
            .upsert_many(&[summary("evt_1", "Rust Meetup", Category::Tech, 2000)], at(1))
            .await
            .unwrap();
        store.upsert_detail(&detail("evt_1", 100, 50), at(2)).await.unwrap();
        store
            .upsert_many(&[summary("evt_1", "Rust Meetup", Category::Tech, 3000)], at(3))
            .await
            .unwrap();

        let record = store.get_by_id("evt_1").await.unwrap().unwrap();
        assert!(record.is_favorite);
        assert_eq!(record.summary.price, 3000);
    }

    #[tokio::test]
    async fn test_upsert_detail_round_trip_and_summary_keeps_details() {
        let store = store().await;

        store.upsert_detail(&detail("evt_1", 120, 30), at(0)).await.unwrap();
        store
            .upsert_many(&[summary("evt_1", "Rust Conf", Category::Tech, 9900)], at(1))
            .await
            .unwrap();

        let record = store.get_by_id("evt_1").await.unwrap().unwrap();
        let fields = record.details.expect("detail fields kept");
        assert_eq!(fields.speakers, vec!["Ferris", "Corro"]);
        assert_eq!(fields.capacity, 120);
        assert_eq!(fields.remaining, 30);
        assert_eq!(record.cached_at, at(1));
    }

    #[tokio::test]
    async fn test_query_filters_and_orders_by_cached_at_desc() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_old", "Rust Basics", Category::Tech, 0)], at(0))
            .await
            .unwrap();
        store
            .upsert_many(
                &[
                    summary("evt_new", "Advanced rust", Category::Tech, 0),
                    summary("evt_art", "Rusty Sculptures", Category::Arts, 0),
                ],
                at(10),
            )
            .await
            .unwrap();

        let tech = store
            .query(
                &EventQuery::new(1)
                    .with_category(CategoryFilter::Only(Category::Tech))
                    .with_search("RUST"),
            )
            .await
            .unwrap();

        let ids: Vec<_> = tech.events.iter().map(|r| r.summary.id.as_str()).collect();
        assert_eq!(ids, vec!["evt_new", "evt_old"]);
        assert_eq!(tech.total_count, 2);
        assert!(!tech.has_more);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let store = store().await;
        store
            .upsert_many(
                &[
                    summary("evt_1", "100% Jazz", Category::Arts, 0),
                    summary("evt_2", "1000 Jazz", Category::Arts, 0),
                ],
                at(0),
            )
            .await
            .unwrap();

        let page = store
            .query(&EventQuery::new(1).with_search("0%"))
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.events[0].summary.id, "evt_1");
    }

    #[tokio::test]
    async fn test_pagination_pages_are_disjoint_and_ordered() {
        let store = store().await;
        let events: Vec<_> = (0..25)
            .map(|i| summary(&format!("evt_{i:02}"), "Meetup", Category::Business, 0))
            .collect();
        store.upsert_many(&events, at(0)).await.unwrap();

        let all = store
            .query(&EventQuery::new(1).with_page_size(100))
            .await
            .unwrap();
        let first = store.query(&EventQuery::new(1)).await.unwrap();
        let second = store.query(&EventQuery::new(2)).await.unwrap();

        let ids = |page: &EventPage<EventRecord>| -> Vec<String> {
            page.events.iter().map(|r| r.summary.id.clone()).collect()
        };
        let mut combined = ids(&first);
        combined.extend(ids(&second));
        let expected: Vec<String> = ids(&all).into_iter().take(20).collect();

        assert_eq!(combined, expected);
        assert!(first.has_more);
        assert!(second.has_more);
        assert_eq!(first.total_count, 25);
    }

    #[tokio::test]
    async fn test_favorites_and_favorite_ids() {
        let store = store().await;
        store
            .upsert_many(
                &[
                    summary("evt_1", "A", Category::Tech, 0),
                    summary("evt_2", "B", Category::Tech, 0),
                    summary("evt_3", "C", Category::Tech, 0),
                ],
                at(0),
            )
            .await
            .unwrap();
        store.set_favorite("evt_1", true).await.unwrap();
        store.set_favorite("evt_3", true).await.unwrap();

        let favorites = store.query_favorites().await.unwrap();
        let ids = store
            .favorite_ids(&["evt_1".to_string(), "evt_2".to_string(), "missing".to_string()])
            .await
            .unwrap();

        assert_eq!(favorites.len(), 2);
        assert!(favorites.iter().all(|r| r.is_favorite));
        assert_eq!(ids, HashSet::from(["evt_1".to_string()]));
        assert!(store.favorite_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_flips_and_missing_id_is_not_found() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 0)], at(0))
            .await
            .unwrap();

        assert!(store.toggle_favorite("evt_1").await.unwrap());
        assert!(!store.toggle_favorite("evt_1").await.unwrap());

        match store.toggle_favorite("evt_404").await {
            Err(StoreError::NotFound { id }) => assert_eq!(id, "evt_404"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
        assert!(matches!(
            store.set_favorite("evt_404", true).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_evict_stale_spares_favorites_and_fresh_rows() {
        let store = store().await;
        let now = at(0) + Duration::days(30);
        store
            .upsert_many(
                &[
                    summary("evt_stale", "A", Category::Tech, 0),
                    summary("evt_fav", "B", Category::Tech, 0),
                ],
                at(0),
            )
            .await
            .unwrap();
        store
            .upsert_many(
                &[summary("evt_fresh", "C", Category::Tech, 0)],
                now - Duration::days(6),
            )
            .await
            .unwrap();
        store.set_favorite("evt_fav", true).await.unwrap();

        let removed = store.evict_stale(now, Duration::days(7)).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get_by_id("evt_stale").await.unwrap().is_none());
        assert!(store.get_by_id("evt_fav").await.unwrap().is_some());
        assert!(store.get_by_id("evt_fresh").await.unwrap().is_some());

        // Even a zero retention window never removes favorites
        store.evict_stale(now, Duration::zero()).await.unwrap();
        assert!(store.get_by_id("evt_fav").await.unwrap().is_some());
        assert!(store.get_by_id("evt_fresh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let store = store().await;
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 0)], at(0))
            .await
            .unwrap();
        store.set_favorite("evt_1", true).await.unwrap();

        assert_eq!(store.clear_all().await.unwrap(), 1);
        assert_eq!(store.query(&EventQuery::new(1)).await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db");

        let store = SqliteEventStore::new(&path);
        store.initialize().await.unwrap();
        store
            .upsert_many(&[summary("evt_1", "A", Category::Tech, 0)], at(0))
            .await
            .unwrap();
        store.set_favorite("evt_1", true).await.unwrap();
        store.close().await.unwrap();

        let reopened = SqliteEventStore::open(StoreLocation::File(path)).await.unwrap();
        let record = reopened.get_by_id("evt_1").await.unwrap().unwrap();
        assert!(record.is_favorite);
    }
}
