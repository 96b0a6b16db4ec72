//! Remote-first sync with cache fallback.
//!
//! Every request walks the same pipeline:
//!
//! ```text
//! TryingRemote ──ok──▶ Success(Remote)
//!      │
//!     err
//!      ▼
//! TryingStore ──hit──▶ Success(Cache)
//!      │
//!     miss
//!      ▼
//!    Empty
//! ```
//!
//! Remote results are written through to the cache before being returned, and
//! both paths attach the persisted favorite flag through a single enrichment step.

use std::sync::Arc;

use eventhub_core::catalog::{EventDetail, EventPage, EventQuery, EventSummary, Favorited};
use eventhub_core::remote::{RemoteError, RemoteSource};
use eventhub_core::storage::StoreError;
use eventhub_core::sync::{
    enrich_one, enrich_with_favorites, event_ids, CatalogResponse, DataSource, DetailResponse, Result,
    SyncError,
};

use crate::repository::CacheRepository;

/// Steps of the remote-then-cache pipeline.
#[derive(Debug)]
enum FetchState<T> {
    TryingRemote,
    TryingStore(RemoteError),
    Success(T, DataSource),
    Empty,
}

/// Coordinates the remote catalog with the local cache.
#[derive(Clone)]
pub struct SyncOrchestrator {
    remote: Arc<dyn RemoteSource>,
    cache: CacheRepository,
}

impl SyncOrchestrator {
    pub fn new(remote: Arc<dyn RemoteSource>, cache: CacheRepository) -> Self {
        Self { remote, cache }
    }

    pub fn cache(&self) -> &CacheRepository {
        &self.cache
    }

    /// Fetches a catalog page, falling back to the cache when the remote fails.
    ///
    /// Never fails: when neither side has matching events, an empty page with
    /// `DataSource::Empty` is returned. A cached page past the last row keeps
    /// the cache's total count.
    pub async fn fetch_events(&self, query: &EventQuery) -> CatalogResponse {
        let mut state = FetchState::TryingRemote;
        loop {
            state = match state {
                FetchState::TryingRemote => match self.fetch_remote_page(query).await {
                    Ok(page) => {
                        if !self.cache.upsert_many(&page.events).await {
                            tracing::warn!(
                                page = query.page,
                                count = page.events.len(),
                                "Catalog page not cached, favorites unavailable for these events"
                            );
                        }
                        FetchState::Success(self.enrich_page(page).await, DataSource::Remote)
                    }
                    Err(err) => FetchState::TryingStore(err),
                },
                FetchState::TryingStore(err) => {
                    tracing::warn!(page = query.page, error = %err, "Remote catalog failed, reading cache");
                    let page = self.cache.query(query).await;
                    if page.total_count == 0 {
                        FetchState::Empty
                    } else {
                        let page = page.map(|record| record.summary);
                        FetchState::Success(self.enrich_page(page).await, DataSource::Cache)
                    }
                }
                FetchState::Success(page, source) => {
                    tracing::debug!(page = query.page, count = page.events.len(), ?source, "Catalog page served");
                    return CatalogResponse { page, source };
                }
                FetchState::Empty => {
                    tracing::debug!(page = query.page, "No catalog data available");
                    return CatalogResponse::empty(query.page);
                }
            };
        }
    }

    /// Fetches an event detail, falling back to the cache when the remote fails.
    ///
    /// Fails with `SyncError::EventNotFound` only when neither side knows the event.
    pub async fn fetch_event_detail(&self, id: &str) -> Result<DetailResponse> {
        let mut state = FetchState::TryingRemote;
        loop {
            state = match state {
                FetchState::TryingRemote => match self.fetch_remote_detail(id).await {
                    Ok(detail) => {
                        if !self.cache.upsert_detail(&detail).await {
                            tracing::warn!(event_id = %id, "Event detail not cached, favorite unavailable");
                        }
                        FetchState::Success(detail, DataSource::Remote)
                    }
                    Err(err) => FetchState::TryingStore(err),
                },
                FetchState::TryingStore(err) => {
                    tracing::warn!(event_id = %id, error = %err, "Remote detail failed, reading cache");
                    match self.cache.get_by_id(id).await {
                        Some(record) => FetchState::Success(record.to_detail(), DataSource::Cache),
                        None => FetchState::Empty,
                    }
                }
                FetchState::Success(detail, source) => {
                    let event = self.enrich_detail(detail).await;
                    tracing::debug!(event_id = %id, ?source, "Event detail served");
                    return Ok(DetailResponse { event, source });
                }
                FetchState::Empty => {
                    return Err(SyncError::EventNotFound { id: id.to_string() });
                }
            };
        }
    }

    /// Favorited events from the cache. Never touches the remote.
    pub async fn favorites(&self) -> Vec<Favorited<EventSummary>> {
        self.cache
            .favorites()
            .await
            .into_iter()
            .map(|record| record.into_favorited_summary())
            .collect()
    }

    /// Flips the favorite flag of a cached event. Never touches the remote.
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        match self.cache.toggle_favorite(id).await {
            Ok(value) => {
                tracing::info!(event_id = %id, is_favorite = value, "Favorite toggled");
                Ok(value)
            }
            Err(StoreError::NotFound { id }) => Err(SyncError::NotFound { id }),
            Err(err) => Err(SyncError::Storage(err)),
        }
    }

    /// Remote page, rejecting events without an identifier.
    async fn fetch_remote_page(
        &self,
        query: &EventQuery,
    ) -> std::result::Result<EventPage<EventSummary>, RemoteError> {
        let page = self.remote.fetch_events(query).await?;
        for event in &page.events {
            event
                .validate()
                .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        }
        Ok(page)
    }

    /// Remote detail, rejecting responses for another event or that break the
    /// seat invariant.
    async fn fetch_remote_detail(&self, id: &str) -> std::result::Result<EventDetail, RemoteError> {
        let detail = self.remote.fetch_event_detail(id).await?;
        if detail.summary.id != id {
            return Err(RemoteError::InvalidResponse(format!(
                "requested event {id}, received {}",
                detail.summary.id
            )));
        }
        detail
            .validate()
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        Ok(detail)
    }

    async fn enrich_page(&self, page: EventPage<EventSummary>) -> EventPage<Favorited<EventSummary>> {
        let favorites = self.cache.favorite_ids(&event_ids(&page.events)).await;
        EventPage {
            events: enrich_with_favorites(page.events, &favorites),
            total_count: page.total_count,
            page: page.page,
            has_more: page.has_more,
        }
    }

    async fn enrich_detail(&self, detail: EventDetail) -> Favorited<EventDetail> {
        let favorites = self
            .cache
            .favorite_ids(&event_ids(std::slice::from_ref(&detail)))
            .await;
        enrich_one(detail, &favorites)
    }
}
