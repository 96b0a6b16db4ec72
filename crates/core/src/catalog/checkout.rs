//! Checkout request types shared with the remote client.
//!
//! Checkout never touches the local cache; these are pure data types with
//! request validation applied before anything is sent.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use super::error::CheckoutError;

/// Maximum number of tickets a single checkout may purchase.
pub const MAX_TICKETS_PER_ORDER: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub name: String,
    pub email: String,
}

/// Request payload for `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub event_id: String,
    pub quantity: u32,
    pub buyer: Buyer,
}

impl CheckoutRequest {
    pub fn new(
        event_id: impl Into<String>,
        quantity: u32,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            quantity,
            buyer: Buyer {
                name: name.into(),
                email: email.into(),
            },
        }
    }

    /// Validates required fields, quantity bounds and the email shape.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.event_id.trim().is_empty() {
            return Err(CheckoutError::MissingField("eventId"));
        }
        if self.buyer.name.trim().is_empty() {
            return Err(CheckoutError::MissingField("buyer.name"));
        }
        if self.buyer.email.trim().is_empty() {
            return Err(CheckoutError::MissingField("buyer.email"));
        }
        if !is_valid_email(&self.buyer.email) {
            return Err(CheckoutError::InvalidEmail(self.buyer.email.clone()));
        }
        if self.quantity == 0 || self.quantity > MAX_TICKETS_PER_ORDER {
            return Err(CheckoutError::InvalidQuantity(self.quantity));
        }
        Ok(())
    }
}

/// Response payload of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub reference: String,
}

/// Word-character local part and domain, optionally joined by single `.`, `+`
/// or `-`, ending in one or more two or three character suffixes.
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\w+([.+-]?\w+)*@\w+([.+-]?\w+)*(\.\w{2,3})+$").ok()
});

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()))
}
