//! Pretty output formatting.

use eventhub_core::catalog::{
    Availability, CheckoutResponse, EventDetail, EventSummary, Favorited,
};
use eventhub_core::sync::{CatalogResponse, DataSource, DetailResponse};

fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Remote => "remote",
        DataSource::Cache => "cache",
        DataSource::Empty => "none",
    }
}

fn star(is_favorite: bool) -> &'static str {
    if is_favorite {
        "★"
    } else {
        " "
    }
}

/// Price in minor units as `12.50`; free events print `Free`.
pub fn format_price(price: u32) -> String {
    if price == 0 {
        "Free".to_string()
    } else {
        format!("{}.{:02}", price / 100, price % 100)
    }
}

/// Format an event summary for display.
pub fn format_summary(event: &Favorited<EventSummary>) -> String {
    let summary = &event.event;
    format!(
        "{} {} [{}]\n  ID: {}\n  When: {}\n  City: {}\n  Price: {}",
        star(event.is_favorite),
        summary.title,
        summary.category,
        summary.id,
        summary.starts_at.format("%Y-%m-%d %H:%M UTC"),
        summary.city,
        format_price(summary.price)
    )
}

/// Format a catalog page for display.
pub fn format_catalog(response: &CatalogResponse) -> String {
    let page = &response.page;
    if page.events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!(
        "EVENTS page {} ({} of {}, from {})\n",
        page.page,
        page.events.len(),
        page.total_count,
        source_label(response.source)
    );
    output.push_str(&"-".repeat(40));
    for event in &page.events {
        output.push_str(&format!("\n{}", format_summary(event)));
        output.push('\n');
    }
    if page.has_more {
        output.push_str(&format!("More events on page {}.", page.page + 1));
    }
    output
}

fn availability_label(detail: &EventDetail) -> String {
    match detail.availability() {
        Availability::Available => format!("{} seats left", detail.fields.remaining),
        Availability::Limited => format!("Only {} seats left", detail.fields.remaining),
        Availability::SoldOut => "Sold out".to_string(),
    }
}

/// Format an event detail for display.
pub fn format_detail(response: &DetailResponse) -> String {
    let detail = &response.event.event;
    let mut output = format!(
        "{}\n  Source: {}",
        format_summary(&Favorited {
            event: detail.summary.clone(),
            is_favorite: response.event.is_favorite,
        }),
        source_label(response.source)
    );
    if !detail.fields.venue.is_empty() {
        output.push_str(&format!("\n  Venue: {}", detail.fields.venue));
    }
    if !detail.fields.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", detail.fields.description));
    }
    if !detail.fields.speakers.is_empty() {
        output.push_str(&format!("\n  Speakers: {}", detail.fields.speakers.join(", ")));
    }
    if detail.fields.capacity > 0 {
        output.push_str(&format!(
            "\n  Seats: {}/{} ({})",
            detail.fields.remaining,
            detail.fields.capacity,
            availability_label(detail)
        ));
    }
    output
}

/// Format favorited events for display.
pub fn format_favorites(events: &[Favorited<EventSummary>]) -> String {
    if events.is_empty() {
        return "No favorites yet.".to_string();
    }
    let mut output = format!("FAVORITES ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_summary(event)));
        output.push('\n');
    }
    output
}

pub fn format_toggle(id: &str, is_favorite: bool) -> String {
    if is_favorite {
        format!("Added {id} to favorites")
    } else {
        format!("Removed {id} from favorites")
    }
}

pub fn format_checkout(response: &CheckoutResponse) -> String {
    if response.success {
        format!("Checkout complete\n  Reference: {}", response.reference)
    } else {
        format!("Checkout failed\n  Reference: {}", response.reference)
    }
}
