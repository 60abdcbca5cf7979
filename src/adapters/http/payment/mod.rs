//! HTTP adapter for payment endpoints.
//!
//! Exposes the payment flows via REST API:
//! - `POST /api/create-order` - Create a Razorpay order
//! - `POST /api/verify-payment` - Verify a checkout confirmation
//! - `POST /api/razorpay-webhook` - Handle Razorpay webhooks
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{PaymentApiError, PaymentAppState, SIGNATURE_HEADER};
pub use routes::{payment_router, payment_routes};
