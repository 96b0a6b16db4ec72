use std::collections::HashSet;

use crate::catalog::{Favorited, Identified};

/// Collects the ids of a batch of events.
pub fn event_ids<T: Identified>(events: &[T]) -> Vec<String> {
    events.iter().map(|e| e.event_id().to_string()).collect()
}

/// Attaches the persisted favorite flag to a single event.
pub fn enrich_one<T: Identified>(event: T, favorites: &HashSet<String>) -> Favorited<T> {
    let is_favorite = favorites.contains(event.event_id());
    Favorited { event, is_favorite }
}

/// Attaches the persisted favorite flag to each event, preserving order.
/// Events absent from `favorites` are not favorited.
pub fn enrich_with_favorites<T: Identified>(
    events: Vec<T>,
    favorites: &HashSet<String>,
) -> Vec<Favorited<T>> {
    events
        .into_iter()
        .map(|event| enrich_one(event, favorites))
        .collect()
}
