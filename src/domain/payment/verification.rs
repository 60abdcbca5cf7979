//! Verification records written after a confirmed checkout.

use serde_json::{Map, Value};

use super::errors::PaymentError;
use crate::domain::document::{Document, FieldValue};

/// Status written to a member document once their payment is verified.
pub const PAYMENT_STATUS_SUCCESS: &str = "Success";

/// Caller-supplied member details attached to a verification.
///
/// Stored as given; only `memberId` is interpreted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberReference(Map<String, Value>);

impl MemberReference {
    /// Reads an optional `member` request field. Null is treated as absent.
    pub fn from_json(value: Option<&Value>) -> Result<Option<Self>, PaymentError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Self(map.clone()))),
            Some(_) => Err(PaymentError::invalid_request("member must be an object")),
        }
    }

    /// The member document id, when present and non-empty.
    pub fn member_id(&self) -> Option<String> {
        match self.0.get("memberId")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for MemberReference {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Merge fields recording that an order's payment was verified.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    pub order_id: String,
    pub payment_id: String,
    pub member: Option<MemberReference>,
}

impl VerificationRecord {
    pub fn to_document(&self) -> Document {
        let member = self
            .member
            .as_ref()
            .map(|m| FieldValue::from(Value::Object(m.as_map().clone())));

        Document::new()
            .with("paymentId", self.payment_id.as_str())
            .with("verified", true)
            .with("verifiedAt", FieldValue::ServerTimestamp)
            .with("member", member)
    }
}

/// Merge fields marking a member as paid.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberPaymentUpdate {
    pub member_id: String,
    pub order_id: String,
    pub payment_id: String,
}

impl MemberPaymentUpdate {
    pub fn to_document(&self) -> Document {
        Document::new()
            .with("paymentStatus", PAYMENT_STATUS_SUCCESS)
            .with(
                "razorpay",
                FieldValue::map([
                    ("order_id", self.order_id.as_str()),
                    ("payment_id", self.payment_id.as_str()),
                ]),
            )
    }
}
