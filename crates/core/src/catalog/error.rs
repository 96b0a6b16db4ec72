use thiserror::Error;

/// Errors raised when an event payload violates a catalog invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event ID cannot be empty")]
    EmptyId,
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),
    #[error("Remaining seats ({remaining}) exceed capacity ({capacity})")]
    RemainingExceedsCapacity { remaining: u32, capacity: u32 },
}

/// Errors raised when validating a checkout request before sending it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Missing required checkout field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("Invalid quantity {0}. Must be between 1 and 10")]
    InvalidQuantity(u32),
}
