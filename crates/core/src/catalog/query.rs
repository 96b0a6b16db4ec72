//! Catalog query parameters and pagination math.
//!
//! Pages are 1-based. `has_more` is true while `page * page_size` is below the
//! total number of matching events.

use serde::{Deserialize, Serialize};

use super::types::{CategoryFilter, EventSummary};

/// Default number of events per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A paginated, filtered catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub page: u32,
    pub page_size: u32,
    pub category: CategoryFilter,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EventQuery {
    /// Creates an unfiltered query for the given page. Page 0 is treated as 1.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: DEFAULT_PAGE_SIZE,
            category: CategoryFilter::All,
            search: None,
        }
    }

    /// Sets the page size. A size of 0 is treated as 1.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Restricts results to a category.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Restricts results to titles containing `search`. Blank input clears the filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size.max(1))
    }

    /// Maximum number of rows in this page.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size.max(1))
    }

    /// Search text as sent to the remote API (empty when unset).
    pub fn search_text(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage<T> {
    pub events: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub has_more: bool,
}

impl<T> EventPage<T> {
    /// An empty page with nothing more to load.
    pub fn empty(page: u32) -> Self {
        Self {
            events: Vec::new(),
            total_count: 0,
            page,
            has_more: false,
        }
    }

    /// Builds a page, deriving `has_more` from the total count.
    pub fn from_total(events: Vec<T>, total_count: u64, query: &EventQuery) -> Self {
        Self {
            events,
            total_count,
            page: query.page,
            has_more: has_more(query.page, query.page_size, total_count),
        }
    }

    /// Maps the events of this page, keeping the pagination metadata.
    pub fn map<U, F>(self, f: F) -> EventPage<U>
    where
        F: FnMut(T) -> U,
    {
        EventPage {
            events: self.events.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            has_more: self.has_more,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Whether rows remain after the given 1-based page.
pub fn has_more(page: u32, page_size: u32, total_count: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total_count
}

/// Lowercased form of a title or search term. Title search compares these.
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
}

/// Whether a summary satisfies the category and title filters of a query.
pub fn matches_query(summary: &EventSummary, query: &EventQuery) -> bool {
    let category_matches = query
        .category
        .category()
        .is_none_or(|category| summary.category == category);
    let search_matches = query
        .search
        .as_deref()
        .is_none_or(|needle| search_key(&summary.title).contains(&search_key(needle)));
    category_matches && search_matches
}

/// Slices an already ordered and filtered list into the requested page.
pub fn paginate<T: Clone>(items: &[T], query: &EventQuery) -> EventPage<T> {
    let total_count = items.len() as u64;
    let events = items
        .iter()
        .skip(query.offset() as usize)
        .take(query.limit() as usize)
        .cloned()
        .collect();
    EventPage::from_total(events, total_count, query)
}
