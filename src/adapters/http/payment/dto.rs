//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! Request bodies keep loosely typed fields as `serde_json::Value` so that a
//! wrong type is reported as `invalid_request` with a useful detail instead
//! of a generic deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::payment::{CreateOrderCommand, VerifyPaymentCommand};
use crate::domain::payment::{
    parse_notes, parse_receipt, MemberReference, MinorUnits, PaymentError,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a checkout order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderBody {
    /// Amount in paise; must be a positive integer.
    #[serde(rename = "amountInPaise", default)]
    pub amount_in_paise: Option<Value>,
    #[serde(default)]
    pub receipt: Option<Value>,
    /// String-to-string map forwarded to Razorpay.
    #[serde(default)]
    pub notes: Option<Value>,
}

impl TryFrom<CreateOrderBody> for CreateOrderCommand {
    type Error = PaymentError;

    fn try_from(request: CreateOrderBody) -> Result<Self, Self::Error> {
        Ok(CreateOrderCommand {
            amount: MinorUnits::from_json(request.amount_in_paise.as_ref(), "amountInPaise")?,
            receipt: parse_receipt(request.receipt.as_ref())?,
            notes: parse_notes(request.notes.as_ref())?,
        })
    }
}

/// Checkout confirmation submitted by the client after payment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentBody {
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
    /// Amount to capture when orders are created in manual-capture mode.
    #[serde(rename = "amountInPaise", default)]
    pub amount_in_paise: Option<Value>,
    /// Member the payment belongs to; `memberId` selects the member document.
    #[serde(default)]
    pub member: Option<Value>,
}

impl TryFrom<VerifyPaymentBody> for VerifyPaymentCommand {
    type Error = PaymentError;

    fn try_from(request: VerifyPaymentBody) -> Result<Self, Self::Error> {
        let amount = match request.amount_in_paise.as_ref() {
            None | Some(Value::Null) => None,
            Some(value) => Some(MinorUnits::from_json(Some(value), "amountInPaise")?),
        };

        Ok(VerifyPaymentCommand {
            payment_id: request.razorpay_payment_id.unwrap_or_default(),
            order_id: request.razorpay_order_id.unwrap_or_default(),
            signature: request.razorpay_signature.unwrap_or_default(),
            amount,
            member: MemberReference::from_json(request.member.as_ref())?,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for order creation: the processor's order payload, unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order: Value,
}

/// Acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub env: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&PaymentError> for ErrorResponse {
    fn from(err: &PaymentError) -> Self {
        Self {
            error: err.code().to_string(),
            detail: err.detail().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body(body: Value) -> CreateOrderBody {
        serde_json::from_value(body).unwrap()
    }

    fn verify_body(body: Value) -> VerifyPaymentBody {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_order_request_converts() {
        let cmd = CreateOrderCommand::try_from(create_body(json!({
            "amountInPaise": 50000,
            "receipt": "rcpt_custom",
            "notes": {"purpose": "membership"}
        })))
        .unwrap();

        assert_eq!(cmd.amount.value(), 50000);
        assert_eq!(cmd.receipt.as_deref(), Some("rcpt_custom"));
        assert_eq!(cmd.notes.get("purpose").map(String::as_str), Some("membership"));
    }

    #[test]
    fn create_order_amount_must_be_integer() {
        for amount in [json!(null), json!("50000"), json!(10.5), json!(0), json!(-5)] {
            let err = CreateOrderCommand::try_from(create_body(json!({
                "amountInPaise": amount
            })))
            .unwrap_err();
            assert!(matches!(err, PaymentError::InvalidRequest(_)), "{amount}");
        }

        let err = CreateOrderCommand::try_from(CreateOrderBody::default()).unwrap_err();
        assert_eq!(err, PaymentError::invalid_request("amountInPaise is required"));
    }

    #[test]
    fn create_order_rejects_non_string_notes() {
        let err = CreateOrderCommand::try_from(create_body(json!({
            "amountInPaise": 100,
            "notes": {"count": 3}
        })))
        .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }

    #[test]
    fn verify_request_converts_with_member() {
        let cmd = VerifyPaymentCommand::try_from(verify_body(json!({
            "razorpay_payment_id": "pay_XYZ",
            "razorpay_order_id": "order_ABC",
            "razorpay_signature": "abc",
            "amountInPaise": 50000,
            "member": {"memberId": "m_1", "name": "Asha"}
        })))
        .unwrap();

        assert_eq!(cmd.payment_id, "pay_XYZ");
        assert_eq!(cmd.order_id, "order_ABC");
        assert_eq!(cmd.amount.map(|a| a.value()), Some(50000));
        assert_eq!(
            cmd.member.and_then(|m| m.member_id()).as_deref(),
            Some("m_1")
        );
    }

    #[test]
    fn verify_request_optional_fields() {
        let cmd = VerifyPaymentCommand::try_from(verify_body(json!({
            "razorpay_payment_id": "pay_XYZ",
            "razorpay_order_id": "order_ABC",
            "razorpay_signature": "abc",
            "amountInPaise": null,
            "member": null
        })))
        .unwrap();

        assert!(cmd.amount.is_none());
        assert!(cmd.member.is_none());
    }

    #[test]
    fn verify_request_missing_ids_become_empty() {
        let cmd = VerifyPaymentCommand::try_from(VerifyPaymentBody::default()).unwrap();
        assert!(cmd.payment_id.is_empty());
        assert!(cmd.signature.is_empty());
    }

    #[test]
    fn verify_request_rejects_bad_amount() {
        let err = VerifyPaymentCommand::try_from(verify_body(json!({
            "razorpay_payment_id": "pay_XYZ",
            "razorpay_order_id": "order_ABC",
            "razorpay_signature": "abc",
            "amountInPaise": "500"
        })))
        .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }

    #[test]
    fn error_response_from_payment_error() {
        let body = ErrorResponse::from(&PaymentError::InvalidSignature);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "invalid_signature"})
        );

        let body = ErrorResponse::from(&PaymentError::order_creation_failed("BAD_REQUEST_ERROR"));
        assert_eq!(body.error, "order_creation_failed");
        assert_eq!(body.detail.as_deref(), Some("BAD_REQUEST_ERROR"));
    }
}
