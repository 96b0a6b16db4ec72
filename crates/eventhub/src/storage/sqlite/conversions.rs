//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

use eventhub_core::catalog::{
    search_key, Category, DetailFields, EventQuery, EventRecord, EventSummary,
};
use eventhub_core::storage::StoreError;

/// Convert a SQLite row to an EventRecord.
///
/// Expected columns: id, title, category, starts_at, city, price, thumbnail,
/// description, venue, speakers, capacity, remaining, is_favorite, cached_at
pub fn row_to_record(row: &Row) -> rusqlite::Result<EventRecord> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let category: String = row.get(2)?;
    let starts_at: String = row.get(3)?;
    let city: String = row.get(4)?;
    let price: u32 = row.get(5)?;
    let thumbnail: String = row.get(6)?;
    let description: Option<String> = row.get(7)?;
    let venue: Option<String> = row.get(8)?;
    let speakers: Option<String> = row.get(9)?;
    let capacity: Option<u32> = row.get(10)?;
    let remaining: Option<u32> = row.get(11)?;
    let is_favorite: bool = row.get(12)?;
    let cached_at: i64 = row.get(13)?;

    let has_details = description.is_some()
        || venue.is_some()
        || speakers.is_some()
        || capacity.is_some()
        || remaining.is_some();

    let details = if has_details {
        Some(DetailFields {
            description: description.unwrap_or_default(),
            venue: venue.unwrap_or_default(),
            speakers: match speakers {
                Some(json) => parse_speakers(&json, 9)?,
                None => Vec::new(),
            },
            capacity: capacity.unwrap_or_default(),
            remaining: remaining.unwrap_or_default(),
        })
    } else {
        None
    };

    Ok(EventRecord {
        summary: EventSummary {
            id,
            title,
            category: parse_category(&category, 2)?,
            starts_at: parse_datetime(&starts_at, 3)?,
            city,
            price,
            thumbnail,
        },
        details,
        is_favorite,
        cached_at: parse_timestamp(cached_at, 13)?,
    })
}

/// Serialize a speaker list to the JSON text stored in `speakers`.
pub fn speakers_to_json(speakers: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(speakers).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Format a timestamp as RFC 3339 text.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Format a cache timestamp as milliseconds since the Unix epoch.
pub fn format_timestamp(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Build the WHERE clause and its parameters for a catalog query.
///
/// Title search is a literal substring match on the lowercased `title_search`
/// column, so wildcards in the input carry no meaning.
pub fn build_filter(query: &EventQuery) -> (String, Vec<Value>) {
    let mut clause = String::from("1=1");
    let mut params = Vec::new();

    if let Some(category) = query.category.category() {
        clause.push_str(" AND category = ?");
        params.push(Value::Text(category.as_str().to_string()));
    }

    if let Some(search) = query.search.as_deref() {
        clause.push_str(" AND instr(title_search, ?) > 0");
        params.push(Value::Text(search_key(search)));
    }

    (clause, params)
}

/// `?, ?, ?` with `count` placeholders.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

// ============================================================================
// Helper functions
// ============================================================================

fn conversion_error(
    column: usize,
    ty: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(err))
}

fn parse_category(s: &str, column: usize) -> rusqlite::Result<Category> {
    s.parse().map_err(|e| conversion_error(column, Type::Text, e))
}

fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, Type::Text, e))
}

fn parse_timestamp(millis: i64, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, millis))
}

fn parse_speakers(json: &str, column: usize) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(json).map_err(|e| conversion_error(column, Type::Text, e))
}
