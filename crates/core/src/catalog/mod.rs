mod checkout;
mod error;
mod query;
mod types;

pub use checkout::{Buyer, CheckoutRequest, CheckoutResponse, MAX_TICKETS_PER_ORDER};
pub use error::{CheckoutError, EventError};
pub use query::{
    has_more, matches_query, paginate, search_key, EventPage, EventQuery, DEFAULT_PAGE_SIZE,
};
pub use types::{
    Availability, Category, CategoryFilter, DetailFields, EventDetail, EventRecord, EventSummary,
    Favorited, Identified, LIMITED_AVAILABILITY_THRESHOLD,
};
