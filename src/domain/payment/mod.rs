//! Payment domain module.
//!
//! Orders, verification records, webhook idempotency records and the
//! signature scheme that guards them.
//!
//! # Module Structure
//!
//! - `errors` - Error taxonomy and HTTP status mapping
//! - `money` - Amount, currency and capture mode
//! - `order` - Order entity and receipt generation
//! - `outcome` - Best-effort action outcomes
//! - `signature` - HMAC-SHA256 signature verification
//! - `verification` - Verification and member update records
//! - `webhook` - Webhook notifications and event records

mod errors;
mod money;
mod order;
mod outcome;
pub mod signature;
mod verification;
mod webhook;

pub use errors::PaymentError;
pub use money::{CaptureMode, Currency, MinorUnits};
pub use order::{generate_receipt, parse_notes, parse_receipt, Notes, Order};
pub use outcome::BestEffort;
pub use signature::{PaymentSignatureVerifier, WebhookSignatureVerifier};
pub use verification::{
    MemberPaymentUpdate, MemberReference, VerificationRecord, PAYMENT_STATUS_SUCCESS,
};
pub use webhook::{WebhookEventRecord, WebhookNotification, PAYMENT_CAPTURED};
