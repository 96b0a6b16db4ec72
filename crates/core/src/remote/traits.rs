use async_trait::async_trait;

use crate::catalog::{EventDetail, EventPage, EventQuery, EventSummary};

use super::Result;

/// The remote event catalog consumed by the sync orchestrator.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// `GET /events?page={n}&q={text}&category={name|All}`.
    async fn fetch_events(&self, query: &EventQuery) -> Result<EventPage<EventSummary>>;

    /// `GET /events/{id}`.
    async fn fetch_event_detail(&self, id: &str) -> Result<EventDetail>;
}
