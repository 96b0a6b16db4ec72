//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite event store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create the events table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY CHECK (id <> ''),
    title TEXT NOT NULL,
    title_search TEXT NOT NULL,
    category TEXT NOT NULL,
    starts_at TEXT NOT NULL,
    city TEXT NOT NULL,
    price INTEGER NOT NULL,
    thumbnail TEXT NOT NULL,
    description TEXT,
    venue TEXT,
    speakers TEXT,
    capacity INTEGER,
    remaining INTEGER,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    cached_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_category ON events(category);
CREATE INDEX IF NOT EXISTS idx_events_is_favorite ON events(is_favorite);
CREATE INDEX IF NOT EXISTS idx_events_cached_at ON events(cached_at DESC, id);
"#;

/// Column list shared by every row-returning query. Order matches
/// `conversions::row_to_record`.
pub const EVENT_COLUMNS: &str = "id, title, category, starts_at, city, price, thumbnail, \
     description, venue, speakers, capacity, remaining, is_favorite, cached_at";

/// Ordering for catalog reads. Rows written in the same batch share
/// `cached_at`, so `id` breaks ties.
pub const ORDER_BY_RECENT: &str = "ORDER BY cached_at DESC, id ASC";

/// Upserts listing fields. `is_favorite` starts at 0 for new rows and is not
/// touched on conflict; detail columns already stored are kept.
///
/// `title_search` holds the lowercased title matched by catalog search.
pub const UPSERT_SUMMARY: &str = r#"
INSERT INTO events (
    id, title, category, starts_at, city, price, thumbnail, is_favorite, cached_at, title_search
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)
ON CONFLICT(id) DO UPDATE SET
    title = excluded.title,
    title_search = excluded.title_search,
    category = excluded.category,
    starts_at = excluded.starts_at,
    city = excluded.city,
    price = excluded.price,
    thumbnail = excluded.thumbnail,
    cached_at = excluded.cached_at
"#;

/// Upserts every column except `is_favorite`.
pub const UPSERT_DETAIL: &str = r#"
INSERT INTO events (
    id, title, category, starts_at, city, price, thumbnail,
    description, venue, speakers, capacity, remaining, is_favorite, cached_at, title_search
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 0, ?13, ?14)
ON CONFLICT(id) DO UPDATE SET
    title = excluded.title,
    title_search = excluded.title_search,
    category = excluded.category,
    starts_at = excluded.starts_at,
    city = excluded.city,
    price = excluded.price,
    thumbnail = excluded.thumbnail,
    description = excluded.description,
    venue = excluded.venue,
    speakers = excluded.speakers,
    capacity = excluded.capacity,
    remaining = excluded.remaining,
    cached_at = excluded.cached_at
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, title, category, starts_at, city, price, thumbnail,
       description, venue, speakers, capacity, remaining, is_favorite, cached_at
FROM events
WHERE id = ?1
"#;

pub const SELECT_FAVORITES: &str = r#"
SELECT id, title, category, starts_at, city, price, thumbnail,
       description, venue, speakers, capacity, remaining, is_favorite, cached_at
FROM events
WHERE is_favorite = 1
ORDER BY cached_at DESC, id ASC
"#;

pub const SELECT_FAVORITE_FLAG: &str = r#"
SELECT is_favorite
FROM events
WHERE id = ?1
"#;

pub const UPDATE_FAVORITE: &str = r#"
UPDATE events
SET is_favorite = ?2
WHERE id = ?1
"#;

pub const DELETE_STALE: &str = r#"
DELETE FROM events
WHERE cached_at < ?1 AND is_favorite = 0
"#;

pub const DELETE_ALL: &str = "DELETE FROM events";
