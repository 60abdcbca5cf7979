//! Payment handlers.
//!
//! Command handlers for the Razorpay checkout flow:
//! - Creating orders
//! - Verifying client checkout confirmations
//! - Processing webhook notifications

mod create_order;
mod handle_webhook;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use handle_webhook::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
