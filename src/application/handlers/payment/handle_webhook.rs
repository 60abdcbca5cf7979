//! HandleWebhookHandler - Command handler for Razorpay webhook notifications.
//!
//! The signature is checked over the exact raw body before anything is
//! parsed. `payment.captured` notifications are recorded under the payment
//! id, so a redelivery overwrites the same document; other events are
//! acknowledged without being stored.

use std::sync::Arc;

use crate::domain::payment::{PaymentError, WebhookNotification, WebhookSignatureVerifier};
use crate::ports::{Collections, DocumentStore, WriteMode};

/// Command to process a webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Request body exactly as received.
    pub raw_body: Vec<u8>,
    /// Value of the `X-Razorpay-Signature` header.
    pub signature: Option<String>,
}

/// What was done with a verified notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleWebhookResult {
    /// A `payment.captured` event was stored.
    Recorded { payment_id: String },
    /// The event type is not stored.
    Ignored { event: String },
}

/// Handler for webhook notifications.
pub struct HandleWebhookHandler {
    store: Arc<dyn DocumentStore>,
    verifier: WebhookSignatureVerifier,
    collections: Collections,
}

impl HandleWebhookHandler {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        verifier: WebhookSignatureVerifier,
        collections: Collections,
    ) -> Self {
        Self {
            store,
            verifier,
            collections,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleWebhookCommand,
    ) -> Result<HandleWebhookResult, PaymentError> {
        if let Err(e) = self
            .verifier
            .verify(&cmd.raw_body, cmd.signature.as_deref())
        {
            tracing::warn!(
                has_signature = cmd.signature.is_some(),
                configured = self.verifier.is_configured(),
                "Webhook signature mismatch"
            );
            return Err(e);
        }

        let notification = WebhookNotification::parse(&cmd.raw_body).map_err(|e| {
            tracing::warn!(error = %e, "Unparseable webhook payload");
            e
        })?;
        let event = notification.event.clone();

        let record = match notification.into_record()? {
            Some(record) => record,
            None => {
                tracing::debug!(event = %event, "Webhook event ignored");
                return Ok(HandleWebhookResult::Ignored { event });
            }
        };

        self.store
            .set(
                &self.collections.webhooks,
                &record.payment_id,
                record.to_document(),
                WriteMode::Replace,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    payment_id = %record.payment_id,
                    error = %e,
                    "Failed to record webhook event"
                );
                PaymentError::persistence(e.to_string())
            })?;

        tracing::info!(payment_id = %record.payment_id, event = %event, "Webhook event recorded");

        Ok(HandleWebhookResult::Recorded {
            payment_id: record.payment_id,
        })
    }
}
