//! HTTP adapters - REST API implementations.

pub mod app;
pub mod payment;

// Re-export key types for convenience
pub use app::{build_app, HttpOptions};
pub use payment::{payment_router, PaymentAppState};
