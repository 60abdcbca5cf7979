//! Razorpay REST request and response bodies.
//!
//! Only the fields the gateway sends or reads are modelled. Order responses
//! are kept as raw JSON so the client receives exactly what Razorpay returned.

use serde::{Deserialize, Serialize};

use crate::domain::payment::Notes;
use crate::ports::{CapturePaymentRequest, CreateOrderRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /v1/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RazorpayOrderBody {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    /// 1 = capture automatically on authorization, 0 = manual capture.
    pub payment_capture: u8,
    pub notes: Notes,
}

impl From<&CreateOrderRequest> for RazorpayOrderBody {
    fn from(request: &CreateOrderRequest) -> Self {
        Self {
            amount: request.amount.value(),
            currency: request.currency.as_str().to_string(),
            receipt: request.receipt.clone(),
            payment_capture: request.capture_mode.as_flag(),
            notes: request.notes.clone(),
        }
    }
}

/// Body of `POST /v1/payments/{id}/capture`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RazorpayCaptureBody {
    pub amount: u64,
    pub currency: String,
}

impl From<&CapturePaymentRequest> for RazorpayCaptureBody {
    fn from(request: &CapturePaymentRequest) -> Self {
        Self {
            amount: request.amount.value(),
            currency: request.currency.as_str().to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Error envelope returned with non-2xx responses.
///
/// ```text
/// {"error": {"code": "BAD_REQUEST_ERROR", "description": "...", "field": "amount"}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorEnvelope {
    pub error: RazorpayErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub field: Option<String>,
}
