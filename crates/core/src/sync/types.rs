use serde::Serialize;

use crate::catalog::{EventDetail, EventPage, EventSummary, Favorited};

/// Where a sync result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Fresh remote data, written through to the cache.
    Remote,
    /// Remote failed; served from the local cache.
    Cache,
    /// Remote failed and the cache had nothing to offer.
    Empty,
}

/// A catalog page enriched with favorite flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub page: EventPage<Favorited<EventSummary>>,
    pub source: DataSource,
}

impl CatalogResponse {
    /// The result when neither remote nor cache produced events.
    pub fn empty(page: u32) -> Self {
        Self {
            page: EventPage::empty(page),
            source: DataSource::Empty,
        }
    }
}

/// A single event detail enriched with its favorite flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    #[serde(flatten)]
    pub event: Favorited<EventDetail>,
    pub source: DataSource,
}
