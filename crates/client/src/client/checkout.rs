//! Ticket checkout API operations.
//!
//! Checkout is remote only: nothing is read from or written to the local cache.

use eventhub_core::catalog::{CheckoutRequest, CheckoutResponse};

use super::EventHubClient;
use crate::error::Result;

impl EventHubClient {
    /// Validate and submit a checkout.
    ///
    /// Invalid requests fail with `ClientError::InvalidInput` without any
    /// network traffic.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse> {
        request.validate()?;

        let response = self
            .client
            .post(self.url("/checkout"))
            .json(request)
            .send()
            .await?;
        let result: CheckoutResponse = self.handle_response(response, "checkout").await?;

        tracing::info!(
            event_id = %request.event_id,
            quantity = request.quantity,
            reference = %result.reference,
            "Checkout completed"
        );
        Ok(result)
    }
}
