//! Razorpay payment processor adapter.
//!
//! Implements the `PaymentProcessor` port for Razorpay:
//! - Order creation (`POST /v1/orders`)
//! - Payment capture (`POST /v1/payments/{id}/capture`)
//!
//! The key secret is held in a `secrecy::SecretString` and never logged.

mod api_types;
mod mock_payment_processor;
mod razorpay_adapter;

pub use api_types::{RazorpayCaptureBody, RazorpayErrorEnvelope, RazorpayOrderBody};
pub use mock_payment_processor::{MethodCall, MockPaymentProcessor};
pub use razorpay_adapter::{RazorpayApiConfig, RazorpayPaymentAdapter, DEFAULT_API_BASE_URL};
