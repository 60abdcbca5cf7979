//! Order entity and request-field parsing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::PaymentError;
use super::money::{CaptureMode, Currency, MinorUnits};
use crate::domain::document::{Document, FieldValue};

/// Free-form key/value notes attached to an order.
pub type Notes = BTreeMap<String, String>;

/// Generates the default receipt, `rcpt_<unix millis>`.
pub fn generate_receipt(now: DateTime<Utc>) -> String {
    format!("rcpt_{}", now.timestamp_millis())
}

/// Reads an optional caller-supplied receipt.
///
/// Absent or null yields `None` (the caller generates one); any non-string
/// value is rejected.
pub fn parse_receipt(value: Option<&Value>) -> Result<Option<String>, PaymentError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(receipt)) => Ok(Some(receipt.clone())),
        Some(_) => Err(PaymentError::invalid_request("receipt must be a string")),
    }
}

/// Reads optional order notes; every value must be a string.
pub fn parse_notes(value: Option<&Value>) -> Result<Notes, PaymentError> {
    match value {
        None | Some(Value::Null) => Ok(Notes::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key.clone(), s.clone())),
                _ => Err(PaymentError::invalid_request(format!(
                    "notes.{key} must be a string"
                ))),
            })
            .collect(),
        Some(_) => Err(PaymentError::invalid_request("notes must be an object")),
    }
}

/// A payment order as created by the processor.
///
/// The identifier is assigned by the processor and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub amount: MinorUnits,
    pub currency: Currency,
    pub receipt: String,
    pub capture_mode: CaptureMode,
    pub notes: Notes,
    /// Full response body returned by the processor.
    pub payload: Value,
}

impl Order {
    /// Document persisted under the order id when the order is created.
    pub fn to_document(&self) -> Document {
        Document::new()
            .with("order", self.payload.clone())
            .with("notes", self.notes.clone())
            .with("createdAt", FieldValue::ServerTimestamp)
    }
}
