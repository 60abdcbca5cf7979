//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    CreateOrderCommand, CreateOrderHandler, CreateOrderResult, HandleWebhookCommand,
    HandleWebhookHandler, HandleWebhookResult, VerifyPaymentCommand, VerifyPaymentHandler,
    VerifyPaymentResult,
};
