//! Event catalog API operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use eventhub_core::catalog::{EventDetail, EventPage, EventQuery, EventSummary};
use eventhub_core::remote::{self, RemoteSource};

use super::EventHubClient;
use crate::error::Result;

/// Query parameters for `GET /events`.
#[derive(Debug, Serialize)]
struct ListEventsQuery<'a> {
    page: u32,
    q: &'a str,
    category: &'static str,
}

impl<'a> From<&'a EventQuery> for ListEventsQuery<'a> {
    fn from(query: &'a EventQuery) -> Self {
        Self {
            page: query.page,
            q: query.search_text(),
            category: query.category.as_query_value(),
        }
    }
}

/// Body of `GET /events/{id}`.
#[derive(Debug, Deserialize)]
struct EventDetailEnvelope {
    event: EventDetail,
}

impl EventHubClient {
    /// List one page of the catalog.
    pub async fn list_events(&self, query: &EventQuery) -> Result<EventPage<EventSummary>> {
        let response = self
            .client
            .get(self.url("/events"))
            .query(&ListEventsQuery::from(query))
            .send()
            .await?;
        self.handle_response(response, "events").await
    }

    /// Get the full detail of an event.
    pub async fn get_event(&self, id: &str) -> Result<EventDetail> {
        let response = self
            .client
            .get(self.url(&format!("/events/{}", urlencoding::encode(id))))
            .send()
            .await?;
        let envelope: EventDetailEnvelope = self.handle_response(response, id).await?;
        Ok(envelope.event)
    }
}

#[async_trait]
impl RemoteSource for EventHubClient {
    async fn fetch_events(&self, query: &EventQuery) -> remote::Result<EventPage<EventSummary>> {
        let page = self.list_events(query).await.map_err(|err| {
            tracing::debug!(page = query.page, error = %err, "Remote catalog request failed");
            err
        })?;
        Ok(page)
    }

    async fn fetch_event_detail(&self, id: &str) -> remote::Result<EventDetail> {
        let detail = self.get_event(id).await.map_err(|err| {
            tracing::debug!(event_id = %id, error = %err, "Remote detail request failed");
            err
        })?;
        Ok(detail)
    }
}
