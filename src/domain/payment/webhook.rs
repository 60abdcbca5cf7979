//! Razorpay webhook notifications and their idempotency records.

use serde_json::Value;

use super::errors::PaymentError;
use crate::domain::document::{Document, FieldValue};

/// The only event type that is persisted; all others are acknowledged.
pub const PAYMENT_CAPTURED: &str = "payment.captured";

/// A webhook body, parsed after its signature has been verified.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookNotification {
    /// Empty when the body has no string `event`.
    pub event: String,
    pub payload: Value,
}

impl WebhookNotification {
    /// Parses a notification from the raw request body.
    ///
    /// Any JSON value is accepted. A missing or non-string `event`, or a
    /// root that is not an object, yields a notification that is not stored.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the body is not JSON.
    pub fn parse(raw_body: &[u8]) -> Result<Self, PaymentError> {
        let mut value: Value = serde_json::from_slice(raw_body)
            .map_err(|e| PaymentError::invalid_request(format!("invalid webhook payload: {e}")))?;

        let event = value
            .get("event")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let payload = value
            .get_mut("payload")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(Self { event, payload })
    }

    pub fn is_payment_captured(&self) -> bool {
        self.event == PAYMENT_CAPTURED
    }

    /// Builds the record to persist, or `None` for events that are not stored.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when a `payment.captured` notification has no
    /// `payload.payment.entity.id`.
    pub fn into_record(self) -> Result<Option<WebhookEventRecord>, PaymentError> {
        if !self.is_payment_captured() {
            return Ok(None);
        }

        let entity = self
            .payload
            .get("payment")
            .and_then(|p| p.get("entity"))
            .filter(|e| e.is_object())
            .cloned()
            .ok_or_else(|| PaymentError::invalid_request("missing payload.payment.entity"))?;

        let payment_id = entity
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| PaymentError::invalid_request("missing payment entity id"))?;

        Ok(Some(WebhookEventRecord {
            payment_id,
            event: self.event,
            payload: entity,
        }))
    }
}

/// Idempotency record of a processed webhook, keyed by payment entity id.
///
/// Redeliveries overwrite the same document.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEventRecord {
    pub payment_id: String,
    pub event: String,
    /// The payment entity from the notification.
    pub payload: Value,
}

impl WebhookEventRecord {
    pub fn to_document(&self) -> Document {
        Document::new()
            .with("event", self.event.as_str())
            .with("payload", self.payload.clone())
            .with("createdAt", FieldValue::ServerTimestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_body() -> &'static [u8] {
        br#"{
            "entity": "event",
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {"id": "pay_XYZ", "amount": 50000, "currency": "INR", "order_id": "order_ABC"}
                }
            }
        }"#
    }

    #[test]
    fn captured_notification_becomes_record() {
        let notification = WebhookNotification::parse(captured_body()).unwrap();
        assert!(notification.is_payment_captured());

        let record = notification.into_record().unwrap().unwrap();

        assert_eq!(record.payment_id, "pay_XYZ");
        assert_eq!(record.event, "payment.captured");
        assert_eq!(record.payload["order_id"], "order_ABC");
    }

    #[test]
    fn other_events_are_not_recorded() {
        let notification =
            WebhookNotification::parse(br#"{"event":"order.paid","payload":{}}"#).unwrap();
        assert!(notification.into_record().unwrap().is_none());
    }

    #[test]
    fn missing_event_is_not_recorded() {
        let notification = WebhookNotification::parse(b"{}").unwrap();
        assert!(notification.into_record().unwrap().is_none());
    }

    #[test]
    fn captured_without_entity_is_invalid() {
        let notification =
            WebhookNotification::parse(br#"{"event":"payment.captured","payload":{}}"#).unwrap();
        assert!(matches!(
            notification.into_record(),
            Err(PaymentError::InvalidRequest(_))
        ));

        let notification = WebhookNotification::parse(
            br#"{"event":"payment.captured","payload":{"payment":{"entity":{"amount":1}}}}"#,
        )
        .unwrap();
        assert!(notification.into_record().is_err());
    }

    #[test]
    fn malformed_json_is_invalid() {
        assert!(matches!(
            WebhookNotification::parse(b"not json"),
            Err(PaymentError::InvalidRequest(_))
        ));
    }

    #[test]
    fn non_string_event_is_not_recorded() {
        let bodies: [&[u8]; 5] = [
            br#"{"event":null,"payload":{}}"#,
            br#"{"event":7}"#,
            br#"{"event":{"name":"payment.captured"}}"#,
            b"[1,2]",
            b"\"payment.captured\"",
        ];
        for body in bodies {
            let notification = WebhookNotification::parse(body).unwrap();
            assert_eq!(notification.event, "");
            assert!(notification.into_record().unwrap().is_none());
        }
    }

    #[test]
    fn record_document_fields() {
        let record = WebhookNotification::parse(captured_body())
            .unwrap()
            .into_record()
            .unwrap()
            .unwrap();

        let doc = record.to_document();

        assert_eq!(doc.get("event").and_then(FieldValue::as_str), Some("payment.captured"));
        assert_eq!(doc.get("createdAt"), Some(&FieldValue::ServerTimestamp));
        let payload = doc.get("payload").and_then(FieldValue::as_map).unwrap();
        assert_eq!(payload.get("id").and_then(FieldValue::as_str), Some("pay_XYZ"));
    }
}
