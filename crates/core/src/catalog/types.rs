use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::EventError;

/// Remaining-seat count below which an event is reported as limited.
pub const LIMITED_AVAILABILITY_THRESHOLD: u32 = 10;

/// The closed set of event categories offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tech,
    Business,
    Health,
    Arts,
    Education,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Tech,
        Category::Business,
        Category::Health,
        Category::Arts,
        Category::Education,
    ];

    /// Returns the canonical name stored in the database and sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Business => "Business",
            Category::Health => "Health",
            Category::Arts => "Arts",
            Category::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EventError::UnknownCategory(s.to_string()))
    }
}

/// Category restriction for catalog queries. `All` applies no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns the category to filter on, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }

    /// Value sent as the `category` query parameter of the remote API.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl FromStr for CategoryFilter {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        trimmed.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Anything carrying a stable event identifier.
pub trait Identified {
    fn event_id(&self) -> &str;
}

/// Catalog listing projection of an event, as returned by paginated queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub starts_at: DateTime<Utc>,
    pub city: String,
    /// Ticket price in minor currency units.
    pub price: u32,
    pub thumbnail: String,
}

impl EventSummary {
    /// Rejects summaries without an identifier.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }
        Ok(())
    }
}

impl Identified for EventSummary {
    fn event_id(&self) -> &str {
        &self.id
    }
}

/// Fields only known once the detail endpoint has been fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFields {
    pub description: String,
    pub venue: String,
    pub speakers: Vec<String>,
    pub capacity: u32,
    pub remaining: u32,
}

/// Full detail projection of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub summary: EventSummary,
    #[serde(flatten)]
    pub fields: DetailFields,
}

impl EventDetail {
    /// Checks the identifier and the seat invariant `remaining <= capacity`.
    pub fn validate(&self) -> Result<(), EventError> {
        self.summary.validate()?;
        if self.fields.remaining > self.fields.capacity {
            return Err(EventError::RemainingExceedsCapacity {
                remaining: self.fields.remaining,
                capacity: self.fields.capacity,
            });
        }
        Ok(())
    }

    /// Classifies ticket availability from the remaining seat count.
    pub fn availability(&self) -> Availability {
        match self.fields.remaining {
            0 => Availability::SoldOut,
            n if n < LIMITED_AVAILABILITY_THRESHOLD => Availability::Limited,
            _ => Availability::Available,
        }
    }
}

impl Identified for EventDetail {
    fn event_id(&self) -> &str {
        &self.summary.id
    }
}

/// Ticket availability of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Limited,
    SoldOut,
}

/// A persisted event row.
///
/// `details` is `None` until a detail fetch has been written for this id.
/// `is_favorite` is owned by the favorite operations only; sync writes never
/// change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(flatten)]
    pub summary: EventSummary,
    #[serde(flatten)]
    pub details: Option<DetailFields>,
    pub is_favorite: bool,
    pub cached_at: DateTime<Utc>,
}

impl EventRecord {
    /// Detail projection of this row. Rows cached from a listing only get
    /// empty detail fields.
    pub fn to_detail(&self) -> EventDetail {
        EventDetail {
            summary: self.summary.clone(),
            fields: self.details.clone().unwrap_or_default(),
        }
    }

    /// Returns the summary with the persisted favorite flag attached.
    pub fn into_favorited_summary(self) -> Favorited<EventSummary> {
        Favorited {
            event: self.summary,
            is_favorite: self.is_favorite,
        }
    }

    /// Returns the detail projection with the persisted favorite flag attached.
    pub fn into_favorited_detail(self) -> Favorited<EventDetail> {
        let is_favorite = self.is_favorite;
        Favorited {
            event: self.to_detail(),
            is_favorite,
        }
    }
}

impl Identified for EventRecord {
    fn event_id(&self) -> &str {
        &self.summary.id
    }
}

/// An event projection enriched with the user's favorite flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorited<T> {
    #[serde(flatten)]
    pub event: T,
    pub is_favorite: bool,
}
